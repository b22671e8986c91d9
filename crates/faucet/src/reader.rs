//! Read layer: contract state behind the dashboard
//!
//! Every value is read independently. A read that fails is logged and left
//! empty so the page can still render with placeholders.

use crate::admin::is_admin;
use crate::contracts::{
    decode_address, decode_decimals, decode_uint, ContractCall, FaucetContract, TokenContract,
};
use crate::error::FaucetResult;
use crate::metrics::FaucetMetrics;
use crate::rpc::RpcClient;
use mtk_common::{
    format_address, format_timestamp, format_token_display, Address, DEFAULT_DECIMALS, U256,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// One read of everything the dashboard shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetSnapshot {
    pub token_address: Address,
    pub faucet_address: Address,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub decimals: Option<u8>,
    pub faucet_balance: Option<U256>,
    pub user_balance: Option<U256>,
    pub drip_limit: Option<U256>,
    pub drip_interval: Option<U256>,
    pub last_drip_time: Option<u64>,
    pub owner: Option<Address>,
}

impl FaucetSnapshot {
    /// Reported decimals, or 18 when the token did not answer (or answered 0)
    pub fn token_decimals(&self) -> u8 {
        self.decimals.filter(|d| *d > 0).unwrap_or(DEFAULT_DECIMALS)
    }

    pub fn is_admin(&self) -> bool {
        is_admin(self.owner, self.account)
    }

    pub fn view(&self) -> FaucetView {
        let decimals = self.token_decimals();
        let faucet_balance = format_token_display(self.faucet_balance, decimals);
        let account = self.account.map(|a| a.to_checksum());

        FaucetView {
            token_address: self.token_address.to_checksum(),
            faucet_address: self.faucet_address.to_checksum(),
            account_short: format_address(account.as_deref()),
            account,
            owner: self.owner.map(|a| a.to_checksum()),
            chain_id: self.chain_id,
            token_decimals: decimals,
            faucet_empty: faucet_balance == "0",
            faucet_balance,
            user_balance: format_token_display(self.user_balance, decimals),
            drip_limit: format_token_display(self.drip_limit, decimals),
            drip_interval: self
                .drip_interval
                .filter(|v| !v.is_zero())
                .map(|v| v.to_string())
                .unwrap_or_else(|| "0".to_string()),
            last_drip_timestamp: self.last_drip_time,
            last_drip_time: format_timestamp(self.last_drip_time),
            is_admin: self.is_admin(),
        }
    }
}

/// Display strings derived from a [`FaucetSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaucetView {
    pub token_address: String,
    pub faucet_address: String,
    pub account: Option<String>,
    pub account_short: String,
    pub owner: Option<String>,
    pub chain_id: Option<u64>,
    pub token_decimals: u8,
    pub faucet_balance: String,
    pub user_balance: String,
    pub drip_limit: String,
    pub drip_interval: String,
    pub last_drip_timestamp: Option<u64>,
    pub last_drip_time: String,
    pub is_admin: bool,
    pub faucet_empty: bool,
}

#[derive(Clone)]
pub struct FaucetReader {
    rpc: RpcClient,
    token: TokenContract,
    faucet: FaucetContract,
    metrics: Arc<FaucetMetrics>,
}

impl FaucetReader {
    pub fn new(
        rpc: RpcClient,
        token: TokenContract,
        faucet: FaucetContract,
        metrics: Arc<FaucetMetrics>,
    ) -> Self {
        Self {
            rpc,
            token,
            faucet,
            metrics,
        }
    }

    pub fn token(&self) -> &TokenContract {
        &self.token
    }

    pub fn faucet(&self) -> &FaucetContract {
        &self.faucet
    }

    async fn read<T>(&self, call: ContractCall, decode: fn(&[u8]) -> FaucetResult<T>) -> Option<T> {
        let result = match self.rpc.eth_call(&call.to, &call.data).await {
            Ok(data) => decode(&data),
            Err(e) => Err(e),
        };
        self.metrics.record_read(call.function, result.is_ok());
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Read {} on {} failed: {}", call.function, call.to, e);
                None
            }
        }
    }

    async fn read_for<T>(
        &self,
        account: Option<Address>,
        call: impl FnOnce(Address) -> ContractCall,
        decode: fn(&[u8]) -> FaucetResult<T>,
    ) -> Option<T> {
        match account {
            Some(account) => self.read(call(account), decode).await,
            None => None,
        }
    }

    /// Token decimals, falling back to 18
    pub async fn token_decimals(&self) -> u8 {
        self.read(self.token.decimals(), decode_decimals)
            .await
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_DECIMALS)
    }

    pub async fn owner(&self) -> Option<Address> {
        self.read(self.faucet.owner(), decode_address).await
    }

    /// Reads all dashboard values concurrently. Per-account values stay empty without an account.
    pub async fn snapshot(&self, account: Option<Address>) -> FaucetSnapshot {
        let faucet_address = self.faucet.address;

        let (
            chain_id,
            decimals,
            faucet_balance,
            user_balance,
            drip_limit,
            drip_interval,
            last_drip_time,
            owner,
        ) = futures::join!(
            async {
                self.rpc
                    .chain_id()
                    .await
                    .map_err(|e| warn!("eth_chainId failed: {}", e))
                    .ok()
            },
            self.read(self.token.decimals(), decode_decimals),
            self.read(self.token.balance_of(faucet_address), decode_uint),
            self.read_for(account, |a| self.token.balance_of(a), decode_uint),
            self.read(self.faucet.get_drip_limit(), decode_uint),
            self.read(self.faucet.get_drip_interval(), decode_uint),
            self.read_for(account, |a| self.faucet.get_drip_time(a), decode_uint),
            self.read(self.faucet.owner(), decode_address),
        );

        let snapshot = FaucetSnapshot {
            token_address: self.token.address,
            faucet_address,
            account,
            chain_id,
            decimals,
            faucet_balance,
            user_balance,
            drip_limit,
            drip_interval,
            last_drip_time: last_drip_time.and_then(|t| u64::try_from(t).ok()),
            owner,
        };
        debug!(?snapshot, "faucet snapshot");
        snapshot
    }
}
