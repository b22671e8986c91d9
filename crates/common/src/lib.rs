//! Shared building blocks for the MTK faucet dashboard: addresses, token unit
//! conversion, display formatting, errors, logging and config loading.

pub mod error;
pub mod types;
pub mod utils;

pub use error::{CommonError, Result, UnitsError};
pub use ethabi::ethereum_types::U256;
pub use types::{same_address, Address};
pub use utils::format::{format_address, format_timestamp, format_timestamp_in};
pub use utils::units::{
    format_token_display, format_units, parse_token_input, parse_units, DEFAULT_DECIMALS,
};
