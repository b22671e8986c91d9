//! Token faucet dashboard
//!
//! Reads faucet and token state through JSON-RPC and submits faucet
//! transactions through a connected wallet:
//! - Read layer (`reader`): balances, drip limit/interval/time, owner
//! - Write layer (`writer`): drip, mint, approve, deposit, admin settings
//! - Presentation (`dashboard`): HTML page and JSON API with admin gating

pub mod admin;
pub mod chains;
pub mod config;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod reader;
pub mod rpc;
pub mod wallet;
pub mod writer;

pub use admin::{is_admin, is_admin_str};
pub use config::FaucetConfig;
pub use dashboard::{Dashboard, Feedback, Notice};
pub use error::{FaucetError, FaucetResult};
pub use reader::{FaucetReader, FaucetSnapshot, FaucetView};
pub use rpc::RpcClient;
pub use wallet::{NodeWallet, Wallet};
pub use writer::{Action, FaucetWriter, TxOutcome, TxStatus};
