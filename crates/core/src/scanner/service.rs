//! Gap scanner service.
//!
//! Symbols are evaluated one at a time, in the order given:
//!
//! 1. Fetch the last few daily bars
//! 2. Compute the gap from the previous close to the latest close
//! 3. Apply the price band and the minimum gap
//! 4. Fetch the profile for the market cap (failure counts as zero)
//! 5. Apply the market cap ceiling
//!
//! The profile is only requested for symbols that survive step 3.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use gapscan_market_data::{MarketDataError, MarketDataProvider, Quote, YahooProvider};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::model::{Opportunity, ScanConfig, Symbol};
use super::observer::{NoopObserver, ScanObserver};
use super::skip::{ScanReport, SkipReason, SymbolOutcome};
use crate::constants::{DEFAULT_HISTORY_DAYS, MIN_HISTORY_BARS};
use crate::errors::Result;

/// Percentage change from `prev_close` to `current`.
///
/// Returns `None` when `prev_close` is zero or the result does not fit in a
/// `Decimal`.
pub fn gap_percent(prev_close: Decimal, current: Decimal) -> Option<Decimal> {
    (current - prev_close)
        .checked_div(prev_close)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Latest bar of a symbol that passed the price and gap filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedBar {
    pub price: Decimal,
    pub gap_percent: Decimal,
    pub volume: u64,
}

/// Apply the history-based filters to a symbol's daily bars.
///
/// `history` is ordered oldest first. Only the last two bars matter.
pub fn screen_history(
    history: &[Quote],
    config: &ScanConfig,
) -> std::result::Result<ScreenedBar, SkipReason> {
    let [.., previous, latest] = history else {
        return Err(SkipReason::InsufficientHistory {
            bars: history.len(),
        });
    };
    debug_assert!(history.len() >= MIN_HISTORY_BARS);

    let price = latest.close;
    if previous.close.is_zero() {
        return Err(SkipReason::ZeroPreviousClose);
    }
    let gap_percent =
        gap_percent(previous.close, price).ok_or(SkipReason::GapOverflow {
            previous_close: previous.close,
            price,
        })?;

    if !config.price_in_range(price) {
        return Err(SkipReason::PriceOutOfRange { price });
    }
    if gap_percent < config.min_gap_percent {
        return Err(SkipReason::GapBelowThreshold { gap_percent });
    }

    Ok(ScreenedBar {
        price,
        gap_percent,
        volume: latest.volume,
    })
}

/// Scans a list of symbols for day-over-day gaps.
///
/// Holds only the injected provider and call settings; each scan is
/// independent and nothing is cached between runs.
pub struct Scanner {
    provider: Arc<dyn MarketDataProvider>,
    history_days: u32,
    call_timeout: Option<Duration>,
}

impl Scanner {
    /// Create a scanner over the given provider.
    ///
    /// Provider calls have no timeout unless one is set with
    /// [`with_call_timeout`](Self::with_call_timeout).
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            history_days: DEFAULT_HISTORY_DAYS,
            call_timeout: None,
        }
    }

    /// Create a scanner backed by Yahoo Finance.
    pub fn yahoo() -> Result<Self> {
        let provider = YahooProvider::new()?;
        info!(
            "Initialized market data provider: {} ({} requests/min)",
            provider.id(),
            provider.rate_limit().requests_per_minute
        );
        Ok(Self::new(Arc::new(provider)))
    }

    /// Number of days of history to request. Never fewer than
    /// [`DEFAULT_HISTORY_DAYS`], so a weekend or holiday still leaves two bars.
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days.max(DEFAULT_HISTORY_DAYS);
        self
    }

    /// Bound every provider call. An elapsed call is treated like any other
    /// provider failure.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    /// Scan `symbols` and return the matches, largest gap first.
    ///
    /// Never fails: symbols whose data cannot be fetched are left out.
    pub async fn scan(&self, symbols: &[Symbol], config: &ScanConfig) -> Vec<Opportunity> {
        self.scan_with_report(symbols, config, &NoopObserver)
            .await
            .opportunities
    }

    /// Scan `symbols`, reporting progress to `observer`, and return the full
    /// report including why each non-matching symbol was skipped.
    pub async fn scan_with_report(
        &self,
        symbols: &[Symbol],
        config: &ScanConfig,
        observer: &dyn ScanObserver,
    ) -> ScanReport {
        let total = symbols.len();
        let mut report = ScanReport::default();

        for (index, symbol) in symbols.iter().enumerate() {
            observer.on_symbol_start(index, total, symbol);

            let outcome = self.evaluate(symbol, config).await;
            match &outcome {
                Ok(opportunity) => debug!(
                    "{} matched: price {} gap {}%",
                    symbol, opportunity.price, opportunity.gap_percent
                ),
                Err(reason) => debug!("Skipping {}: {}", symbol, reason),
            }

            observer.on_symbol_done(symbol, &outcome);
            report.record(symbol.clone(), outcome);
        }

        report.rank();
        info!("{}", report.summary());
        observer.on_scan_complete(&report);
        report
    }

    /// Evaluate a single symbol against `config`.
    pub async fn evaluate(&self, symbol: &Symbol, config: &ScanConfig) -> SymbolOutcome {
        let history = self
            .call(
                self.provider
                    .get_daily_history(symbol.as_str(), self.history_days),
            )
            .await
            .map_err(|e| SkipReason::HistoryUnavailable {
                message: e.to_string(),
                transient: e.is_transient(),
            })?;

        let bar = screen_history(&history, config)?;

        let market_cap = self.fetch_market_cap(symbol).await;
        if market_cap > config.max_market_cap {
            return Err(SkipReason::MarketCapAboveLimit { market_cap });
        }

        Ok(Opportunity {
            symbol: symbol.clone(),
            price: bar.price,
            gap_percent: bar.gap_percent,
            volume: bar.volume,
            market_cap,
        })
    }

    /// Market cap for `symbol`, or zero when it cannot be determined.
    async fn fetch_market_cap(&self, symbol: &Symbol) -> Decimal {
        match self.call(self.provider.get_profile(symbol.as_str())).await {
            Ok(profile) => {
                let market_cap = profile
                    .market_cap
                    .and_then(Decimal::from_f64_retain)
                    .unwrap_or(Decimal::ZERO);
                debug!(
                    "{} ({}): market cap {} {}",
                    symbol,
                    profile.name.as_deref().unwrap_or("unnamed"),
                    market_cap,
                    profile.currency.as_deref().unwrap_or("")
                );
                market_cap
            }
            Err(e) => {
                debug!("Profile fetch failed for {}: {}, using zero market cap", symbol, e);
                Decimal::ZERO
            }
        }
    }

    /// Run a provider call under the configured timeout.
    async fn call<T, F>(&self, request: F) -> std::result::Result<T, MarketDataError>
    where
        F: Future<Output = std::result::Result<T, MarketDataError>>,
    {
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| {
                    Err(MarketDataError::Timeout {
                        provider: self.provider.id().to_string(),
                    })
                }),
            None => request.await,
        }
    }
}
