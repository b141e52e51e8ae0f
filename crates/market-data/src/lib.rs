//! Gap Scanner Market Data Crate
//!
//! This crate provides the market data seam used by the scanner: a
//! provider-agnostic trait, the data models it returns, and the Yahoo
//! Finance implementation.
//!
//! # Overview
//!
//! The scanner needs two things per ticker:
//! - A short series of daily closes and volumes (the most recent bars)
//! - Company metadata carrying the market capitalization
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Scanner      |  (gapscan-core)
//! +------------------+
//!          |
//!          v
//! +--------------------+     +------------------+
//! | MarketDataProvider | --> |   RateLimiter    |  (token bucket)
//! +--------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! | Quote / Profile  |  (daily bars, market cap)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - One daily bar (close + volume)
//! - [`AssetProfile`] - Provider-sourced metadata including market cap
//! - [`MarketDataProvider`] - The provider trait
//! - [`YahooProvider`] - Yahoo Finance implementation
//! - [`RateLimiter`] - Token bucket guarding outbound calls

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{AssetProfile, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, RateLimit, RateLimiter};
