//! Core error types.

use gapscan_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the scanner crate.
///
/// A running scan never produces one of these: per-symbol failures are
/// recorded as skips. Errors only surface while building a scanner or
/// validating its configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),
}
