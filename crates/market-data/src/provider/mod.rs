//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Rate limit configuration and the token bucket that enforces it
//! - The Yahoo Finance implementation
//!
//! Providers are stateless from the scanner's point of view: every call is a
//! fresh fetch and nothing is cached between scans.

mod limits;
mod rate_limiter;
mod traits;

pub mod yahoo;

// Re-exports
pub use limits::RateLimit;
pub use rate_limiter::RateLimiter;
pub use traits::MarketDataProvider;
