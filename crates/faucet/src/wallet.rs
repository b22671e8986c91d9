//! Connected wallet: the account that signs and sends transactions

use crate::contracts::ContractCall;
use crate::error::{FaucetError, FaucetResult};
use crate::rpc::{RpcClient, TransactionRequest};
use async_trait::async_trait;
use mtk_common::Address;
use tracing::{debug, info, warn};

/// Something that can send transactions on behalf of an account
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Connected account
    fn account(&self) -> Address;

    /// Submits the call and returns the transaction hash
    async fn send(&self, call: &ContractCall) -> FaucetResult<String>;
}

/// Wallet backed by an account the node manages and signs for
#[derive(Debug, Clone)]
pub struct NodeWallet {
    rpc: RpcClient,
    account: Address,
}

impl NodeWallet {
    pub fn new(rpc: RpcClient, account: Address) -> Self {
        Self { rpc, account }
    }

    /// Connects `preferred`, or the node's first account when none is given.
    ///
    /// Returns `Ok(None)` when the node exposes no accounts.
    pub async fn connect(rpc: RpcClient, preferred: Option<Address>) -> FaucetResult<Option<Self>> {
        let accounts = match rpc.accounts().await {
            Ok(accounts) => accounts,
            Err(FaucetError::Rpc { code, message }) if preferred.is_some() => {
                warn!(code, "eth_accounts unavailable ({}), using configured account", message);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let account = match preferred {
            Some(account) => {
                if !accounts.is_empty() && !accounts.contains(&account) {
                    warn!("Account {} is not managed by the node; sends may be rejected", account);
                }
                account
            }
            None => match accounts.first() {
                Some(first) => *first,
                None => {
                    info!("Node exposes no accounts; no wallet connected");
                    return Ok(None);
                }
            },
        };

        info!("Wallet connected: {}", account.to_checksum());
        Ok(Some(Self::new(rpc, account)))
    }
}

#[async_trait]
impl Wallet for NodeWallet {
    fn account(&self) -> Address {
        self.account
    }

    async fn send(&self, call: &ContractCall) -> FaucetResult<String> {
        let tx = TransactionRequest {
            from: self.account,
            to: call.to,
            data: call.data.clone(),
        };
        debug!("Sending {} to {} from {}", call.function, call.to, self.account);
        self.rpc.send_transaction(&tx).await
    }
}
