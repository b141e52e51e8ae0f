//! Domain models for the gap scanner.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{Error, Result};

// =============================================================================
// Symbol
// =============================================================================

/// Ticker symbol as sent to the provider.
///
/// Examples: "MARA", "RIOT", "SOFI"
///
/// Normalized to trimmed upper case on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// ScanConfig
// =============================================================================

/// Thresholds for one scan.
///
/// Supplied fresh for every run. `max_market_cap` is in currency units, not
/// billions; use [`ScanConfig::with_max_cap_billions`] to convert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Minimum day-over-day gap, in percent
    pub min_gap_percent: Decimal,
    /// Lowest accepted current price (inclusive)
    pub min_price: Decimal,
    /// Highest accepted current price (inclusive)
    pub max_price: Decimal,
    /// Largest accepted market capitalization (inclusive)
    pub max_market_cap: Decimal,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_gap_percent: DEFAULT_MIN_GAP_PERCENT,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            max_market_cap: DEFAULT_MAX_CAP_BILLIONS * BILLION,
        }
    }
}

impl ScanConfig {
    pub fn new(
        min_gap_percent: Decimal,
        min_price: Decimal,
        max_price: Decimal,
        max_market_cap: Decimal,
    ) -> Self {
        Self {
            min_gap_percent,
            min_price,
            max_price,
            max_market_cap,
        }
    }

    /// Set the market cap ceiling from a figure in billions.
    ///
    /// Fails when the figure is too large to express in currency units.
    pub fn with_max_cap_billions(mut self, billions: Decimal) -> Result<Self> {
        self.max_market_cap = billions.checked_mul(BILLION).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "maximum market cap of {} billion is too large",
                billions
            ))
        })?;
        Ok(self)
    }

    /// Check the thresholds describe a usable scan.
    ///
    /// The scanner itself accepts any config (an empty price band just
    /// matches nothing); drivers call this to reject bad input up front.
    pub fn validate(&self) -> Result<()> {
        if self.min_gap_percent <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "minimum gap must be positive, got {}",
                self.min_gap_percent
            )));
        }
        if self.min_price.is_sign_negative() {
            return Err(Error::InvalidConfig(format!(
                "minimum price must not be negative, got {}",
                self.min_price
            )));
        }
        if self.max_price <= self.min_price {
            return Err(Error::InvalidConfig(format!(
                "maximum price {} must be greater than minimum price {}",
                self.max_price, self.min_price
            )));
        }
        if self.max_market_cap.is_sign_negative() {
            return Err(Error::InvalidConfig(format!(
                "maximum market cap must not be negative, got {}",
                self.max_market_cap
            )));
        }
        Ok(())
    }

    /// Whether `price` lies inside the configured band.
    pub fn price_in_range(&self, price: Decimal) -> bool {
        self.min_price <= price && price <= self.max_price
    }
}

// =============================================================================
// Opportunity
// =============================================================================

/// A symbol that passed every filter in a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub symbol: Symbol,
    /// Close of the most recent bar
    pub price: Decimal,
    /// Signed change from the previous close, in percent
    pub gap_percent: Decimal,
    /// Volume of the most recent bar
    pub volume: u64,
    /// Market capitalization; zero when the provider had no figure
    pub market_cap: Decimal,
}

impl Opportunity {
    /// Price as `$10.50`.
    pub fn formatted_price(&self) -> String {
        format!(
            "${:.2}",
            self.price.round_dp(DISPLAY_DECIMAL_PRECISION)
        )
    }

    /// Gap as `+5.0%`, always signed.
    pub fn formatted_gap(&self) -> String {
        let gap = self.gap_percent.round_dp(GAP_DECIMAL_PRECISION);
        let sign = if gap.is_sign_negative() && !gap.is_zero() {
            ""
        } else {
            "+"
        };
        format!("{}{:.1}%", sign, gap)
    }

    /// Market cap in billions as `$1.00B`.
    pub fn formatted_cap(&self) -> String {
        let billions = (self.market_cap / BILLION).round_dp(DISPLAY_DECIMAL_PRECISION);
        format!("${:.2}B", billions)
    }
}
