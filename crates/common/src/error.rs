use thiserror::Error;

/// Common error types shared by the faucet crates
#[derive(Error, Debug)]
pub enum CommonError {
    /// Address parsing errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Amount parsing errors
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while converting between decimal strings and fixed-point integers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,

    #[error("unexpected character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("amount contains more than one decimal point")]
    MultipleDecimalPoints,

    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CommonError>;

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        CommonError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<config::ConfigError> for CommonError {
    fn from(err: config::ConfigError) -> Self {
        CommonError::Config(format!("Configuration error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_error_wraps_into_common_error() {
        let err: CommonError = UnitsError::MultipleDecimalPoints.into();
        assert_eq!(
            err.to_string(),
            "Invalid amount: amount contains more than one decimal point"
        );
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let err: CommonError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, CommonError::Config(_)));
    }
}
