//! Error types for the faucet dashboard

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mtk_common::{CommonError, UnitsError};
use serde_json::json;
use thiserror::Error;

/// Faucet dashboard errors
#[derive(Error, Debug)]
pub enum FaucetError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),

    #[error("No wallet connected")]
    NotConnected,

    #[error("Only the faucet owner can {0}")]
    Unauthorized(&'static str),

    #[error("Another transaction is still pending")]
    Busy,

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ABI error: {0}")]
    Abi(#[from] ethabi::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FaucetError {
    /// Human-readable text shown next to the form that failed.
    ///
    /// Node errors are surfaced verbatim; everything else uses its display form.
    pub fn short_message(&self) -> String {
        match self {
            FaucetError::Rpc { message, .. } => message.clone(),
            FaucetError::InvalidAmount(err) => format!("Invalid amount: {}", err),
            other => other.to_string(),
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            FaucetError::InvalidAddress(_) => (StatusCode::BAD_REQUEST, "INVALID_ADDRESS"),
            FaucetError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            FaucetError::NotConnected => (StatusCode::PRECONDITION_FAILED, "NOT_CONNECTED"),
            FaucetError::Unauthorized(_) => (StatusCode::FORBIDDEN, "UNAUTHORIZED"),
            FaucetError::Busy => (StatusCode::CONFLICT, "BUSY"),
            FaucetError::Rpc { .. } => (StatusCode::BAD_GATEWAY, "RPC_ERROR"),
            FaucetError::Http(_) => (StatusCode::BAD_GATEWAY, "HTTP_ERROR"),
            FaucetError::Abi(_) => (StatusCode::BAD_GATEWAY, "ABI_ERROR"),
            FaucetError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            FaucetError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<CommonError> for FaucetError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidAddress(msg) => FaucetError::InvalidAddress(msg),
            CommonError::InvalidAmount(units) => FaucetError::InvalidAmount(units),
            CommonError::Config(msg) => FaucetError::Config(msg),
            other => FaucetError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for FaucetError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = Json(json!({
            "error": error_code,
            "message": self.short_message(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));

        (status, body).into_response()
    }
}

pub type FaucetResult<T> = Result<T, FaucetError>;
