//! Presentation layer: binds the read and write layers to the dashboard page and API

pub mod api;
pub mod view;

use crate::admin::is_admin;
use crate::chains::{find_chain, supported_chains, Chain};
use crate::config::FaucetConfig;
use crate::contracts::{FaucetContract, TokenContract};
use crate::error::{FaucetError, FaucetResult};
use crate::metrics::FaucetMetrics;
use crate::reader::{FaucetReader, FaucetSnapshot};
use crate::rpc::RpcClient;
use crate::wallet::{NodeWallet, Wallet};
use crate::writer::{Action, FaucetWriter, TxOutcome, TxStatus};
use mtk_common::Address;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Message shown under the forms after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Outcome of a form submission, used to re-render the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub action: Option<Action>,
    /// Input to put back into the form (kept on failure, cleared on success)
    pub input: String,
    pub notice: Option<Notice>,
}

pub struct Dashboard {
    app_name: String,
    token_symbol: String,
    project_id: Option<String>,
    chains: Vec<Chain>,
    reader: FaucetReader,
    writer: Option<FaucetWriter>,
    metrics: Arc<FaucetMetrics>,
    in_flight: Mutex<()>,
}

impl Dashboard {
    pub fn new(
        config: &FaucetConfig,
        reader: FaucetReader,
        writer: Option<FaucetWriter>,
        metrics: Arc<FaucetMetrics>,
    ) -> Self {
        Self {
            app_name: config.app_name.clone(),
            token_symbol: config.token_symbol.clone(),
            project_id: config.project_id.clone(),
            chains: supported_chains(config),
            reader,
            writer,
            metrics,
            in_flight: Mutex::new(()),
        }
    }

    /// Wires RPC, contracts and wallet from configuration
    pub async fn connect(config: &FaucetConfig) -> FaucetResult<Self> {
        config.validate()?;

        let metrics = Arc::new(
            FaucetMetrics::new().map_err(|e| FaucetError::Internal(format!("metrics: {}", e)))?,
        );
        let rpc = RpcClient::new(config.rpc_url.clone());
        let reader = FaucetReader::new(
            rpc.clone(),
            TokenContract::new(config.token_address),
            FaucetContract::new(config.faucet_address),
            metrics.clone(),
        );

        let wallet = NodeWallet::connect(rpc.clone(), config.account).await?;
        let writer = wallet.map(|wallet| {
            let wallet: Arc<dyn Wallet> = Arc::new(wallet);
            let writer = FaucetWriter::new(reader.clone(), wallet, rpc.clone(), metrics.clone());
            if config.wait_for_receipt {
                writer.with_receipts(config.receipt_timeout())
            } else {
                writer
            }
        });

        let dashboard = Self::new(config, reader, writer, metrics);
        dashboard.check_chain(&rpc).await;
        Ok(dashboard)
    }

    async fn check_chain(&self, rpc: &RpcClient) {
        match rpc.chain_id().await {
            Ok(id) => match find_chain(&self.chains, id) {
                Some(chain) => info!("Connected to {} (chain id {})", chain.name, id),
                None => warn!(
                    "Chain id {} is not among the supported chains; \
                     enable testnets or the local net if this is intended",
                    id
                ),
            },
            Err(e) => warn!("Could not read chain id from {}: {}", rpc.url(), e),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn token_symbol(&self) -> &str {
        &self.token_symbol
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn metrics(&self) -> &FaucetMetrics {
        &self.metrics
    }

    /// Connected account, if a wallet is attached
    pub fn account(&self) -> Option<Address> {
        self.writer.as_ref().map(|w| w.wallet().account())
    }

    pub async fn snapshot(&self) -> FaucetSnapshot {
        self.reader.snapshot(self.account()).await
    }

    /// True while a transaction is being submitted
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Submits `action` with the user's input.
    ///
    /// Blank input is ignored and yields `Ok(None)`. Only one submission runs at a
    /// time; admin actions require the connected account to own the faucet.
    pub async fn submit(&self, action: Action, input: &str) -> FaucetResult<Option<TxOutcome>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let writer = self.writer.as_ref().ok_or(FaucetError::NotConnected)?;
        let _guard = self.in_flight.try_lock().map_err(|_| FaucetError::Busy)?;

        if action.requires_admin() {
            let owner = self.reader.owner().await;
            if !is_admin(owner, Some(writer.wallet().account())) {
                return Err(FaucetError::Unauthorized(action.describe()));
            }
        }

        writer.submit(action, input).await.map(Some)
    }

    /// [`Dashboard::submit`] folded into the message the page shows
    pub async fn handle(&self, action: Action, input: &str) -> Feedback {
        match self.submit(action, input).await {
            Ok(None) => Feedback {
                action: Some(action),
                input: String::new(),
                notice: None,
            },
            Ok(Some(outcome)) if outcome.status == TxStatus::Reverted => Feedback {
                action: Some(action),
                input: input.to_string(),
                notice: Some(Notice::Error(format!("Transaction {} reverted", outcome.hash))),
            },
            Ok(Some(outcome)) => {
                let text = match outcome.status {
                    TxStatus::Pending => format!(
                        "{} Transaction {} is pending.",
                        action.success_message(),
                        outcome.hash
                    ),
                    _ => action.success_message().to_string(),
                };
                Feedback {
                    action: Some(action),
                    input: String::new(),
                    notice: Some(Notice::Success(text)),
                }
            }
            Err(e) => {
                warn!("{} rejected: {}", action, e);
                let message = e.short_message();
                let text = if message.trim().is_empty() {
                    action.failure_message().to_string()
                } else {
                    message
                };
                Feedback {
                    action: Some(action),
                    input: input.to_string(),
                    notice: Some(Notice::Error(text)),
                }
            }
        }
    }
}
