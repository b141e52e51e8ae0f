//! Yahoo Finance market data provider.
//!
//! Daily bars come from the chart endpoint through `yahoo_finance_api`.
//! Company metadata (market cap, name) comes from the quoteSummary endpoint,
//! which requires a cookie + crumb pair obtained from Yahoo first.

mod models;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote};
use crate::provider::{MarketDataProvider, RateLimit, RateLimiter};

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

fn crumb_read() -> RwLockReadGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn crumb_write() -> RwLockWriteGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn provider_error(message: impl Into<String>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| provider_error(format!("Failed to initialize Yahoo connector: {}", e)))?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            connector,
            client,
            rate_limiter: RateLimiter::new(Self::RATE_LIMIT),
        })
    }

    const RATE_LIMIT: RateLimit = RateLimit {
        requests_per_minute: 2000,
        burst: 10,
        min_delay: Duration::from_millis(50),
    };

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let cached = crumb_read().clone();
        if let Some(crumb) = cached {
            return Ok(crumb);
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        self.rate_limiter.acquire().await;
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        self.rate_limiter.acquire().await;
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        *crumb_write() = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        *crumb_write() = None;
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert a Yahoo bar to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: &yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        // Close price is required; NaN and infinities are rejected here
        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote::new(timestamp, close, yahoo_quote.volume, PROVIDER_ID))
    }

    /// Map quoteSummary result to AssetProfile.
    fn map_quote_summary_to_profile(result: &YahooQuoteSummaryResult) -> AssetProfile {
        let price = result.price.as_ref();

        AssetProfile {
            name: price.and_then(|p| p.long_name.clone().or_else(|| p.short_name.clone())),
            currency: price.and_then(|p| p.currency.clone()).or_else(|| {
                result
                    .summary_detail
                    .as_ref()
                    .and_then(|d| d.currency.clone())
            }),
            market_cap: result.market_cap(),
        }
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        Self::RATE_LIMIT
    }

    async fn get_daily_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!("Fetching {}d daily history for {} from Yahoo", days, symbol);

        self.rate_limiter.acquire().await;
        let range = format!("{}d", days);
        let response = self
            .connector
            .get_quote_range(symbol, "1d", &range)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    provider_error(e.to_string())
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let quotes: Vec<Quote> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match Self::yahoo_quote_to_quote(q) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping {} bar due to conversion error: {}", symbol, e);
                            None
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!("No daily bars returned for '{}' over {}", symbol, range);
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(provider_error(e.to_string())),
        }
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        debug!("Fetching profile for {} from Yahoo", symbol);

        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryDetail&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        self.rate_limiter.acquire().await;
        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Profile request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb();
                return Err(provider_error("Yahoo authentication expired"));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse profile response: {}", e)))?;

        let result = data
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(Self::map_quote_summary_to_profile(&result))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn yahoo_bar(timestamp: i64, close: f64, volume: u64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp: timestamp as _,
            open: close,
            high: close,
            low: close,
            volume,
            close,
            adjclose: close,
        }
    }

    #[test]
    fn test_yahoo_quote_to_quote() {
        let quote = YahooProvider::yahoo_quote_to_quote(&yahoo_bar(1_733_150_000, 10.5, 1200))
            .unwrap();

        assert_eq!(quote.close, dec!(10.5));
        assert_eq!(quote.volume, 1200);
        assert_eq!(quote.source, "YAHOO");
        assert_eq!(quote.timestamp.timestamp(), 1_733_150_000);
    }

    #[test]
    fn test_yahoo_quote_rejects_nan_close() {
        let mut bar = yahoo_bar(1_733_150_000, 1.0, 10);
        bar.close = f64::NAN;

        let result = YahooProvider::yahoo_quote_to_quote(&bar);
        assert!(matches!(
            result,
            Err(MarketDataError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_map_quote_summary_to_profile() {
        let result: YahooQuoteSummaryResult = serde_json::from_str(
            r#"{
                "price": {
                    "currency": "USD",
                    "shortName": "Riot Platforms",
                    "quoteType": "equity",
                    "marketCap": {"raw": 3500000000}
                }
            }"#,
        )
        .unwrap();

        let profile = YahooProvider::map_quote_summary_to_profile(&result);
        assert_eq!(profile.name.as_deref(), Some("Riot Platforms"));
        assert_eq!(profile.currency.as_deref(), Some("USD"));
        assert_eq!(profile.market_cap, Some(3500000000.0));
    }

    #[test]
    fn test_rate_limit() {
        let rate_limit = YahooProvider::RATE_LIMIT;

        assert_eq!(rate_limit.requests_per_minute, 2000);
        assert_eq!(rate_limit.burst, 10);
        assert_eq!(rate_limit.min_delay, Duration::from_millis(50));
    }
}
