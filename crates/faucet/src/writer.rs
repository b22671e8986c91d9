//! Write layer: turns typed amounts into contract transactions

use crate::contracts::ContractCall;
use crate::error::{FaucetError, FaucetResult};
use crate::metrics::FaucetMetrics;
use crate::reader::FaucetReader;
use crate::rpc::RpcClient;
use crate::wallet::Wallet;
use mtk_common::{parse_units, UnitsError, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Everything a user can submit from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Drip,
    Mint,
    Approve,
    Deposit,
    SetDripInterval,
    SetDripLimit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Drip,
        Action::Mint,
        Action::Approve,
        Action::Deposit,
        Action::SetDripInterval,
        Action::SetDripLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Drip => "drip",
            Action::Mint => "mint",
            Action::Approve => "approve",
            Action::Deposit => "deposit",
            Action::SetDripInterval => "set-drip-interval",
            Action::SetDripLimit => "set-drip-limit",
        }
    }

    /// Only the faucet owner sees these controls
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Action::Drip)
    }

    /// Verb phrase used in authorization errors
    pub fn describe(&self) -> &'static str {
        match self {
            Action::Drip => "request tokens",
            Action::Mint => "mint tokens",
            Action::Approve => "approve the faucet",
            Action::Deposit => "deposit into the faucet",
            Action::SetDripInterval => "change the drip interval",
            Action::SetDripLimit => "change the drip limit",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Drip => "Tokens claimed!",
            Action::Mint => "Tokens minted!",
            Action::Approve => "Approval granted!",
            Action::Deposit => "Deposited into the faucet!",
            Action::SetDripInterval => "Drip interval updated!",
            Action::SetDripLimit => "Drip limit updated!",
        }
    }

    /// Shown when the error itself carries no text
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::Drip => "Claim failed, please try again",
            Action::Mint => "Mint failed, please try again",
            Action::Approve => "Approval failed, please try again",
            Action::Deposit => "Deposit failed, please try again",
            Action::SetDripInterval | Action::SetDripLimit => "Update failed, please try again",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = FaucetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| FaucetError::Internal(format!("Unknown action: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Reverted,
}

/// Result of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub action: Action,
    pub hash: String,
    pub status: TxStatus,
}

/// Whole-number input such as a drip interval in seconds
pub fn parse_integer(input: &str) -> Result<U256, UnitsError> {
    if input.contains('.') {
        return Err(UnitsError::InvalidCharacter('.'));
    }
    parse_units(input, 0)
}

#[derive(Clone)]
pub struct FaucetWriter {
    reader: FaucetReader,
    wallet: Arc<dyn Wallet>,
    rpc: RpcClient,
    metrics: Arc<FaucetMetrics>,
    receipt_timeout: Option<Duration>,
    poll_interval: Duration,
}

impl FaucetWriter {
    pub fn new(
        reader: FaucetReader,
        wallet: Arc<dyn Wallet>,
        rpc: RpcClient,
        metrics: Arc<FaucetMetrics>,
    ) -> Self {
        Self {
            reader,
            wallet,
            rpc,
            metrics,
            receipt_timeout: None,
            poll_interval: Duration::from_millis(500),
        }
    }

    /// Poll for receipts for up to `timeout` after each submission
    pub fn with_receipts(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = Some(timeout);
        self
    }

    pub fn wallet(&self) -> &Arc<dyn Wallet> {
        &self.wallet
    }

    pub async fn drip(&self, amount: &str) -> FaucetResult<TxOutcome> {
        let amount = self.parse_amount(amount).await?;
        self.send(Action::Drip, self.reader.faucet().drip(amount)).await
    }

    pub async fn mint(&self, amount: &str) -> FaucetResult<TxOutcome> {
        let amount = self.parse_amount(amount).await?;
        self.send(Action::Mint, self.reader.token().mint(amount)).await
    }

    /// Lets the faucet pull `amount` from the connected account
    pub async fn approve_faucet(&self, amount: &str) -> FaucetResult<TxOutcome> {
        let amount = self.parse_amount(amount).await?;
        let spender = self.reader.faucet().address;
        self.send(Action::Approve, self.reader.token().approve(spender, amount)).await
    }

    pub async fn deposit(&self, amount: &str) -> FaucetResult<TxOutcome> {
        let amount = self.parse_amount(amount).await?;
        self.send(Action::Deposit, self.reader.faucet().deposit(amount)).await
    }

    /// Interval is in whole seconds and is not scaled by the token decimals
    pub async fn set_drip_interval(&self, seconds: &str) -> FaucetResult<TxOutcome> {
        let seconds = parse_integer(seconds)?;
        self.send(Action::SetDripInterval, self.reader.faucet().set_drip_interval(seconds))
            .await
    }

    pub async fn set_drip_limit(&self, amount: &str) -> FaucetResult<TxOutcome> {
        let amount = self.parse_amount(amount).await?;
        self.send(Action::SetDripLimit, self.reader.faucet().set_drip_limit(amount))
            .await
    }

    pub async fn submit(&self, action: Action, input: &str) -> FaucetResult<TxOutcome> {
        match action {
            Action::Drip => self.drip(input).await,
            Action::Mint => self.mint(input).await,
            Action::Approve => self.approve_faucet(input).await,
            Action::Deposit => self.deposit(input).await,
            Action::SetDripInterval => self.set_drip_interval(input).await,
            Action::SetDripLimit => self.set_drip_limit(input).await,
        }
    }

    async fn parse_amount(&self, input: &str) -> FaucetResult<U256> {
        let decimals = self.reader.token_decimals().await;
        Ok(parse_units(input, decimals)?)
    }

    async fn send(&self, action: Action, call: ContractCall) -> FaucetResult<TxOutcome> {
        let hash = match self.wallet.send(&call).await {
            Ok(hash) => hash,
            Err(e) => {
                error!("{} failed: {}", action, e);
                self.metrics.record_transaction(action.as_str(), false);
                return Err(e);
            }
        };
        info!("{} submitted: {}", action, hash);

        let status = match self.receipt_timeout {
            Some(timeout) => self.await_receipt(&hash, timeout).await,
            None => TxStatus::Pending,
        };
        self.metrics
            .record_transaction(action.as_str(), status != TxStatus::Reverted);

        Ok(TxOutcome { action, hash, status })
    }

    async fn await_receipt(&self, hash: &str, timeout: Duration) -> TxStatus {
        let poll = async {
            let mut interval = tokio::time::interval(self.poll_interval);
            loop {
                interval.tick().await;
                match self.rpc.transaction_receipt(hash).await {
                    Ok(Some(receipt)) if receipt.succeeded() => return TxStatus::Confirmed,
                    Ok(Some(_)) => {
                        warn!("Transaction {} reverted", hash);
                        return TxStatus::Reverted;
                    }
                    Ok(None) => continue,
                    Err(e) => warn!("Receipt lookup for {} failed: {}", hash, e),
                }
            }
        };

        tokio::time::timeout(timeout, poll).await.unwrap_or_else(|_| {
            warn!("No receipt for {} after {:?}", hash, timeout);
            TxStatus::Pending
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_roundtrip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("withdraw".parse::<Action>().is_err());
    }

    #[test]
    fn test_only_drip_is_public() {
        let public: Vec<Action> = Action::ALL.into_iter().filter(|a| !a.requires_admin()).collect();
        assert_eq!(public, vec![Action::Drip]);
    }

    #[test]
    fn test_action_serde_matches_route_names() {
        assert_eq!(serde_json::to_value(Action::SetDripLimit).unwrap(), "set-drip-limit");
        let parsed: Action =
            serde_json::from_value(serde_json::json!("set-drip-interval")).unwrap();
        assert_eq!(parsed, Action::SetDripInterval);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("3600").unwrap(), U256::from(3600u64));
        assert_eq!(parse_integer("1.5"), Err(UnitsError::InvalidCharacter('.')));
        assert_eq!(parse_integer(""), Err(UnitsError::Empty));
        assert_eq!(parse_integer("-5"), Err(UnitsError::InvalidCharacter('-')));
    }
}
