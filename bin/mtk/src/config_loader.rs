use crate::cli::Cli;
use anyhow::{Context, Result};
use mtk_faucet::FaucetConfig;

/// File and environment first, then command line flags
pub fn load_faucet_config(args: &Cli) -> Result<FaucetConfig> {
    let mut config = FaucetConfig::load(args.config.as_deref())?;

    if let Some(rpc_url) = &args.rpc_url {
        config.rpc_url = rpc_url.clone();
    }

    if let Some(account) = &args.account {
        config.account = Some(
            account
                .parse()
                .with_context(|| format!("invalid --account {}", account))?,
        );
    }

    if args.debug {
        config.logging.level = "debug".to_string();
    }

    config.validate()?;
    Ok(config)
}
