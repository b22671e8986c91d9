//! Minimal Ethereum JSON-RPC client over HTTP

use crate::error::{FaucetError, FaucetResult};
use mtk_common::Address;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Transaction handed to the node for signing (`eth_sendTransaction`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    #[serde(serialize_with = "serialize_bytes")]
    pub data: Vec<u8>,
}

fn serialize_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

/// Subset of a transaction receipt the dashboard cares about
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Post-Byzantium receipts carry `0x1` on success
    pub fn succeeded(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| parse_quantity(s).map(|v| v == 1).unwrap_or(false))
            .unwrap_or(true)
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC client for the node the dashboard talks to
#[derive(Debug, Clone)]
pub struct RpcClient {
    rpc_url: String,
    client: reqwest::Client,
    next_id: std::sync::Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            client: reqwest::Client::new(),
            next_id: std::sync::Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    async fn call(&self, method: &str, params: Value) -> FaucetResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });
        trace!(method, id, "rpc request");

        let response = self.client.post(&self.rpc_url).json(&payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let http_error = || FaucetError::Rpc {
            code: i64::from(status.as_u16()),
            message: format!("HTTP {}: {}", status, String::from_utf8_lossy(&body).trim()),
        };

        // An error object is reported as is, whatever the HTTP status
        let response: Value = match serde_json::from_slice::<Value>(&body) {
            Ok(value) if status.is_success() || value.get("error").is_some() => value,
            Ok(_) => return Err(http_error()),
            Err(_) if !status.is_success() => return Err(http_error()),
            Err(e) => return Err(FaucetError::Internal(format!("Invalid RPC response: {}", e))),
        };

        if let Some(error) = response.get("error") {
            let error: RpcErrorObject =
                serde_json::from_value(error.clone()).map_err(|_| FaucetError::Rpc {
                    code: 0,
                    message: error.to_string(),
                })?;
            debug!(method, code = error.code, data = ?error.data, "rpc error: {}", error.message);
            return Err(FaucetError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }

    pub async fn chain_id(&self) -> FaucetResult<u64> {
        let result = self.call("eth_chainId", json!([])).await?;
        expect_quantity(&result)
    }

    /// Accounts the node can sign for
    pub async fn accounts(&self) -> FaucetResult<Vec<Address>> {
        let result = self.call("eth_accounts", json!([])).await?;
        let raw: Vec<String> = serde_json::from_value(result)
            .map_err(|e| FaucetError::Internal(format!("Invalid eth_accounts response: {}", e)))?;
        raw.iter()
            .map(|a| a.parse::<Address>().map_err(FaucetError::from))
            .collect()
    }

    /// Read-only contract call against the latest block
    pub async fn eth_call(&self, to: &Address, data: &[u8]) -> FaucetResult<Vec<u8>> {
        let result = self
            .call(
                "eth_call",
                json!([{ "to": to, "data": format!("0x{}", hex::encode(data)) }, "latest"]),
            )
            .await?;
        expect_bytes(&result)
    }

    /// Returns the transaction hash
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> FaucetResult<String> {
        let result = self.call("eth_sendTransaction", json!([tx])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FaucetError::Internal(format!("Invalid transaction hash: {}", result)))
    }

    pub async fn transaction_receipt(
        &self,
        hash: &str,
    ) -> FaucetResult<Option<TransactionReceipt>> {
        let result = self.call("eth_getTransactionReceipt", json!([hash])).await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| FaucetError::Internal(format!("Invalid receipt: {}", e)))
    }
}

/// Parses a `0x`-prefixed hex quantity
pub fn parse_quantity(s: &str) -> Option<u64> {
    let digits = s.strip_prefix("0x")?;
    if digits.is_empty() {
        return Some(0);
    }
    u64::from_str_radix(digits, 16).ok()
}

fn expect_quantity(value: &Value) -> FaucetResult<u64> {
    value
        .as_str()
        .and_then(parse_quantity)
        .ok_or_else(|| FaucetError::Internal(format!("Invalid quantity: {}", value)))
}

fn expect_bytes(value: &Value) -> FaucetResult<Vec<u8>> {
    let s = value
        .as_str()
        .ok_or_else(|| FaucetError::Internal(format!("Invalid data: {}", value)))?;
    hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| FaucetError::Internal(format!("Invalid hex data: {}", e)))
}
