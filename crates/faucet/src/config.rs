//! Faucet dashboard configuration

use crate::error::{FaucetError, FaucetResult};
use mtk_common::utils::config::load_config;
use mtk_common::utils::logging::LoggingConfig;
use mtk_common::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Token contract address of the default local (anvil) deployment
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Faucet contract address of the default local (anvil) deployment
pub const DEFAULT_FAUCET_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

/// Faucet dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaucetConfig {
    /// Name shown in the page title and `/api/info`
    pub app_name: String,

    /// Dashboard listen address
    pub server_addr: String,

    /// JSON-RPC endpoint of the node
    pub rpc_url: String,

    /// ERC-20 token contract
    pub token_address: Address,

    /// Faucet contract
    pub faucet_address: Address,

    /// Account to act as; the node's first account when unset
    pub account: Option<Address>,

    /// Wallet-connect project id
    pub project_id: Option<String>,

    /// Include public testnets in the supported chains
    pub enable_testnets: bool,

    /// Include the local dev chain in the supported chains
    pub enable_local_net: bool,

    /// Symbol appended to displayed amounts
    pub token_symbol: String,

    /// Poll for a receipt after submitting a transaction
    pub wait_for_receipt: bool,

    /// How long to poll before reporting a transaction as still pending (seconds)
    pub receipt_timeout_secs: u64,

    /// Enable CORS on the dashboard API
    pub cors_enabled: bool,

    pub logging: LoggingConfig,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            app_name: "MTK Faucet".to_string(),
            server_addr: "0.0.0.0:3000".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            token_address: DEFAULT_TOKEN_ADDRESS.parse().unwrap_or_default(),
            faucet_address: DEFAULT_FAUCET_ADDRESS.parse().unwrap_or_default(),
            account: None,
            project_id: None,
            enable_testnets: false,
            enable_local_net: false,
            token_symbol: "MTK".to_string(),
            wait_for_receipt: true,
            receipt_timeout_secs: 30,
            cors_enabled: true,
            logging: LoggingConfig::default(),
        }
    }
}

fn env_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl FaucetConfig {
    /// Load from environment variables with defaults
    pub fn from_env() -> FaucetResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults, then the optional config file, then the environment
    pub fn load(path: Option<&Path>) -> FaucetResult<Self> {
        let Some(path) = path else {
            return Self::from_env();
        };
        let mut config: Self =
            load_config(path).map_err(|e| FaucetError::Config(format!("{:#}", e)))?;
        config.apply_env()?;
        Ok(config)
    }

    /// Overrides fields from `FAUCET_*` environment variables
    pub fn apply_env(&mut self) -> FaucetResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F>(&mut self, var: F) -> FaucetResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("FAUCET_APP_NAME") {
            self.app_name = name;
        }

        if let Some(addr) = var("FAUCET_SERVER_ADDR") {
            self.server_addr = addr;
        }

        if let Some(rpc_url) = var("FAUCET_RPC_URL") {
            self.rpc_url = rpc_url;
        }

        if let Some(token) = var("FAUCET_TOKEN_ADDRESS") {
            self.token_address = token.parse()?;
        }

        if let Some(faucet) = var("FAUCET_CONTRACT_ADDRESS") {
            self.faucet_address = faucet.parse()?;
        }

        if let Some(account) = var("FAUCET_ACCOUNT") {
            self.account = Some(account.parse()?);
        }

        if let Some(project_id) = var("FAUCET_PROJECT_ID") {
            self.project_id = Some(project_id).filter(|p| !p.is_empty());
        }

        if let Some(enabled) = var("FAUCET_ENABLE_TESTNETS") {
            self.enable_testnets = env_flag(&enabled);
        }

        if let Some(enabled) = var("FAUCET_ENABLE_LOCAL_NET") {
            self.enable_local_net = env_flag(&enabled);
        }

        if let Some(symbol) = var("FAUCET_TOKEN_SYMBOL") {
            self.token_symbol = symbol;
        }

        if let Some(wait) = var("FAUCET_WAIT_FOR_RECEIPT") {
            self.wait_for_receipt = env_flag(&wait);
        }

        if let Some(timeout) = var("FAUCET_RECEIPT_TIMEOUT") {
            self.receipt_timeout_secs = timeout.trim().parse().map_err(|_| {
                FaucetError::Config(format!(
                    "FAUCET_RECEIPT_TIMEOUT must be whole seconds, got '{}'",
                    timeout
                ))
            })?;
        }

        if let Some(cors) = var("FAUCET_CORS_ENABLED") {
            self.cors_enabled = env_flag(&cors);
        }

        Ok(())
    }

    /// Reject settings the dashboard cannot work with
    pub fn validate(&self) -> FaucetResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(FaucetError::Config("rpc_url must not be empty".to_string()));
        }
        if self.token_address.is_zero() {
            return Err(FaucetError::Config(
                "token_address must not be the zero address".to_string(),
            ));
        }
        if self.faucet_address.is_zero() {
            return Err(FaucetError::Config(
                "faucet_address must not be the zero address".to_string(),
            ));
        }
        Ok(())
    }

    /// Get receipt polling timeout
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}
