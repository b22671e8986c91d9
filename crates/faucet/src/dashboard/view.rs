//! Server-rendered dashboard page

use super::{Feedback, Notice};
use crate::reader::FaucetView;
use crate::writer::Action;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f5f6fa; margin: 0; }
.container { max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
.header { text-align: center; }
.subtitle { color: #666; }
.network-info, .section, .admin-section {
  background: #fff; border-radius: 8px; padding: 1rem 1.5rem; margin-bottom: 1rem;
}
.admin-section { border: 1px solid #f0c36d; }
.info-item, .config-item { display: flex; gap: .5rem; align-items: center; padding: .3rem 0; }
.info-label, .config-label { font-weight: 600; min-width: 12rem; }
.config-value { font-family: monospace; }
.admin-function { margin-bottom: 1rem; }
.admin-note { color: #888; font-size: .85rem; }
.error-message { color: #c0392b; }
.success-message { color: #27ae60; }
.debug-note { color: #999; font-size: .8rem; text-align: center; }
"#;

/// Minimal escaping for text and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n\
         <body>\n<div class=\"container\">\n{}</div>\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// Page shown while no wallet is connected
pub fn render_disconnected(app_name: &str) -> String {
    layout(
        app_name,
        "<h1>Please connect a wallet first</h1>\n\
         <p>Start the dashboard with an account the node can sign for.</p>\n",
    )
}

/// Everything the page needs besides the contract values
pub struct PageContext<'a> {
    pub app_name: &'a str,
    pub token_symbol: &'a str,
    pub busy: bool,
    pub feedback: &'a Feedback,
}

impl PageContext<'_> {
    fn disabled(&self) -> &'static str {
        if self.busy {
            " disabled"
        } else {
            ""
        }
    }

    /// Input value for `action`: what the user typed if this action just ran, else `default`
    fn input_for<'b>(&'b self, action: Action, default: &'b str) -> &'b str {
        if self.feedback.action == Some(action) {
            &self.feedback.input
        } else {
            default
        }
    }
}

fn amount_form(
    ctx: &PageContext<'_>,
    action: Action,
    placeholder: &str,
    button: &str,
    default: &str,
) -> String {
    format!(
        "<form method=\"post\" action=\"/actions/{}\">\n\
         <input class=\"drip-input\" type=\"text\" name=\"amount\" \
         value=\"{}\" placeholder=\"{}\"{}>\n\
         <button class=\"drip-button\" type=\"submit\"{}>{}</button>\n</form>\n",
        action.as_str(),
        escape_html(ctx.input_for(action, default)),
        escape_html(placeholder),
        ctx.disabled(),
        ctx.disabled(),
        escape_html(button)
    )
}

fn info_row(out: &mut String, class: &str, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "<div class=\"{c}-item\"><span class=\"{c}-label\">{}</span>\
         <span class=\"{c}-value\">{}</span></div>",
        escape_html(label),
        escape_html(value),
        c = class
    );
}

fn config_form_row(
    out: &mut String,
    ctx: &PageContext<'_>,
    label: &str,
    action: Action,
    current: &str,
) {
    let _ = writeln!(
        out,
        "<div class=\"config-item\"><span class=\"config-label\">{}</span>\n\
         <form method=\"post\" action=\"/actions/{}\">\n\
         <input class=\"config-input\" type=\"text\" name=\"amount\" value=\"{}\"{}>\n\
         <button class=\"config-button\" type=\"submit\"{}>Update</button>\n</form></div>",
        escape_html(label),
        action.as_str(),
        escape_html(ctx.input_for(action, current)),
        ctx.disabled(),
        ctx.disabled()
    );
}

/// Full dashboard for a connected account
pub fn render_dashboard(ctx: &PageContext<'_>, view: &FaucetView) -> String {
    let symbol = ctx.token_symbol;
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<div class=\"header\"><h1 class=\"title\">{} Token Faucet</h1>\
         <p class=\"subtitle\">Claim free {} tokens</p></div>",
        escape_html(symbol),
        escape_html(symbol)
    );

    body.push_str("<div class=\"network-info\">\n");
    info_row(&mut body, "info", "Current account:", &view.account_short);
    info_row(&mut body, "info", "Token balance:", &format!("{} {}", view.user_balance, symbol));
    if view.is_admin {
        info_row(&mut body, "info", "Role:", "Admin");
    }
    body.push_str("</div>\n");

    body.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Faucet</h2>\n");
    info_row(&mut body, "config", &format!("{} token address:", symbol), &view.token_address);
    info_row(&mut body, "config", "Faucet contract address:", &view.faucet_address);
    if view.is_admin {
        config_form_row(
            &mut body,
            ctx,
            "Drip interval (seconds):",
            Action::SetDripInterval,
            &view.drip_interval,
        );
        config_form_row(
            &mut body,
            ctx,
            "Maximum per claim:",
            Action::SetDripLimit,
            &view.drip_limit,
        );
    } else {
        info_row(&mut body, "config", "Drip interval (seconds):", &view.drip_interval);
        let limit = format!("{} {}", view.drip_limit, symbol);
        info_row(&mut body, "config", "Maximum per claim:", &limit);
    }
    let balance = format!("{} {}", view.faucet_balance, symbol);
    info_row(&mut body, "config", "Faucet balance:", &balance);
    info_row(&mut body, "config", "Last claim:", &view.last_drip_time);
    body.push_str("</div>\n");

    body.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Claim tokens</h2>\n");
    body.push_str(&amount_form(ctx, Action::Drip, "Amount to claim", "Claim now!", ""));
    match &ctx.feedback.notice {
        Some(Notice::Error(text)) => {
            let _ = writeln!(body, "<p class=\"error-message\">{}</p>", escape_html(text));
        }
        Some(Notice::Success(text)) => {
            let _ = writeln!(body, "<p class=\"success-message\">{}</p>", escape_html(text));
        }
        None => {}
    }
    let has_error = matches!(ctx.feedback.notice, Some(Notice::Error(_)));
    if view.faucet_empty && !has_error {
        body.push_str(
            "<p class=\"error-message\">Faucet is out of tokens, please contact the admin</p>\n",
        );
    }
    body.push_str("</div>\n");

    if view.is_admin {
        body.push_str("<div class=\"admin-section\">\n<h2 class=\"section-title\">Admin</h2>\n");

        body.push_str("<div class=\"admin-function\"><h3>Mint tokens</h3>\n");
        body.push_str(&amount_form(ctx, Action::Mint, "Amount to mint", "Mint", ""));
        body.push_str("</div>\n");

        body.push_str("<div class=\"admin-function\"><h3>Approve faucet</h3>\n");
        body.push_str(&amount_form(ctx, Action::Approve, "Amount to approve", "Approve", ""));
        body.push_str(
            "<p class=\"admin-note\">Note: approval lets the faucet contract \
             transfer tokens from your account</p>\n</div>\n",
        );

        body.push_str("<div class=\"admin-function\"><h3>Deposit into faucet</h3>\n");
        body.push_str(&amount_form(ctx, Action::Deposit, "Amount to deposit", "Deposit", ""));
        body.push_str(
            "<p class=\"admin-note\">Note: deposits move tokens from your account \
             into the faucet contract</p>\n</div>\n",
        );

        body.push_str("</div>\n");
    }

    let _ = writeln!(
        body,
        "<p class=\"debug-note\">Token decimals: {}</p>",
        view.token_decimals
    );

    layout(ctx.app_name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::FaucetSnapshot;
    use mtk_common::U256;

    const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn page(view: &FaucetView, feedback: &Feedback, busy: bool) -> String {
        let ctx = PageContext {
            app_name: "MTK Faucet",
            token_symbol: "MTK",
            busy,
            feedback,
        };
        render_dashboard(&ctx, view)
    }

    fn funded(owner_is_account: bool) -> FaucetView {
        let owner = OWNER.parse().unwrap();
        FaucetSnapshot {
            account: Some(if owner_is_account { owner } else { mtk_common::Address::ZERO }),
            owner: Some(owner),
            decimals: Some(18),
            faucet_balance: Some(U256::from(10u64) * U256::exp10(18)),
            drip_interval: Some(U256::from(60u64)),
            ..Default::default()
        }
        .view()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_admin_controls_hidden_from_others() {
        let html = page(&funded(false), &Feedback::default(), false);
        assert!(html.contains("/actions/drip"));
        assert!(!html.contains("/actions/mint"));
        assert!(!html.contains("/actions/set-drip-interval"));
        assert!(!html.contains("Role:"));
    }

    #[test]
    fn test_admin_sees_every_control() {
        let html = page(&funded(true), &Feedback::default(), false);
        for action in Action::ALL {
            assert!(html.contains(&format!("/actions/{}", action.as_str())), "{}", action);
        }
        assert!(html.contains("value=\"60\""));
    }

    #[test]
    fn test_empty_faucet_notice_yields_to_errors() {
        let empty = FaucetSnapshot::default().view();
        let html = page(&empty, &Feedback::default(), false);
        assert!(html.contains("Faucet is out of tokens"));

        let failed = Feedback {
            action: Some(Action::Drip),
            input: "5".to_string(),
            notice: Some(Notice::Error("execution reverted: <cooldown>".to_string())),
        };
        let html = page(&empty, &failed, false);
        assert!(!html.contains("Faucet is out of tokens"));
        assert!(html.contains("execution reverted: &lt;cooldown&gt;"));
        assert!(html.contains("name=\"amount\" value=\"5\""));
    }

    #[test]
    fn test_busy_disables_buttons() {
        let html = page(&funded(false), &Feedback::default(), true);
        assert!(html.contains("type=\"submit\" disabled"));
    }

    #[test]
    fn test_disconnected_page() {
        assert!(render_disconnected("MTK Faucet").contains("connect a wallet"));
    }
}
