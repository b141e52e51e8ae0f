//! Skip reasons and the aggregate scan report.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::model::{Opportunity, Symbol};

/// Result of evaluating a single symbol.
pub type SymbolOutcome = std::result::Result<Opportunity, SkipReason>;

/// Reason a symbol produced no opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The history fetch failed (network, unknown symbol, bad payload, timeout).
    HistoryUnavailable { message: String, transient: bool },
    /// Fewer than two daily bars came back.
    InsufficientHistory { bars: usize },
    /// The previous close was zero, so the gap is undefined.
    ZeroPreviousClose,
    /// The previous close is so small the gap does not fit in a `Decimal`.
    GapOverflow {
        previous_close: Decimal,
        price: Decimal,
    },
    /// Current price outside the configured band.
    PriceOutOfRange { price: Decimal },
    /// Gap below the configured minimum.
    GapBelowThreshold { gap_percent: Decimal },
    /// Market cap above the configured maximum.
    MarketCapAboveLimit { market_cap: Decimal },
}

impl SkipReason {
    /// Whether the skip came from the provider rather than from a filter.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SkipReason::HistoryUnavailable { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HistoryUnavailable { message, .. } => {
                write!(f, "History unavailable ({})", message)
            }
            SkipReason::InsufficientHistory { bars } => {
                write!(f, "Insufficient history ({} bars)", bars)
            }
            SkipReason::ZeroPreviousClose => write!(f, "Previous close is zero"),
            SkipReason::GapOverflow {
                previous_close,
                price,
            } => write!(f, "Gap from {} to {} is out of range", previous_close, price),
            SkipReason::PriceOutOfRange { price } => write!(f, "Price {} out of range", price),
            SkipReason::GapBelowThreshold { gap_percent } => {
                write!(f, "Gap {}% below threshold", gap_percent.round_dp(2))
            }
            SkipReason::MarketCapAboveLimit { market_cap } => {
                write!(f, "Market cap {} above limit", market_cap)
            }
        }
    }
}

/// Aggregate result of a scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Matches, ranked by gap descending once the scan completes.
    pub opportunities: Vec<Opportunity>,
    /// Symbols that produced no opportunity, in scan order.
    pub skipped: Vec<(Symbol, SkipReason)>,
    /// Number of symbols evaluated.
    pub scanned: usize,
}

impl ScanReport {
    /// Fold one symbol's outcome into the report.
    pub(crate) fn record(&mut self, symbol: Symbol, outcome: SymbolOutcome) {
        self.scanned += 1;
        match outcome {
            Ok(opportunity) => self.opportunities.push(opportunity),
            Err(reason) => self.skipped.push((symbol, reason)),
        }
    }

    /// Sort opportunities by gap, largest first.
    ///
    /// `sort_by` is stable, so equal gaps keep scan order.
    pub(crate) fn rank(&mut self) {
        self.opportunities
            .sort_by(|a, b| b.gap_percent.cmp(&a.gap_percent));
    }

    /// Number of symbols whose data could not be fetched.
    pub fn fetch_failures(&self) -> usize {
        self.skipped
            .iter()
            .filter(|(_, reason)| reason.is_fetch_failure())
            .count()
    }

    /// True when symbols were scanned and none of them could be fetched.
    ///
    /// Lets a driver tell "provider unreachable" apart from "nothing matched".
    pub fn all_fetches_failed(&self) -> bool {
        self.scanned > 0 && self.fetch_failures() == self.scanned
    }

    /// Summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "Scanned {} symbols: {} matched, {} filtered out, {} failed to fetch",
            self.scanned,
            self.opportunities.len(),
            self.skipped.len() - self.fetch_failures(),
            self.fetch_failures()
        )
    }
}
