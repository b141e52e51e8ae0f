//! Gap Scanner Core - the screening logic.
//!
//! This crate contains the scanner: given a list of tickers and four
//! thresholds it fetches recent daily bars through a
//! [`MarketDataProvider`](gapscan_market_data::MarketDataProvider), computes
//! the day-over-day gap and returns the tickers that pass every filter,
//! ranked by gap.
//!
//! It holds no process-wide state; the provider is injected so the scan can
//! be exercised with canned data.

pub mod constants;
pub mod errors;
pub mod scanner;

pub use scanner::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
