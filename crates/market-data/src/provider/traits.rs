//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote};

use super::limits::RateLimit;

/// Trait for market data providers.
///
/// Implement this trait to plug a new market data source into the scanner,
/// or to feed it canned data in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use gapscan_market_data::{AssetProfile, MarketDataError, MarketDataProvider, Quote};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_daily_history(
///         &self,
///         symbol: &str,
///         days: u32,
///     ) -> Result<Vec<Quote>, MarketDataError> {
///         // ...
///     }
///
///     async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    ///
    /// Returns the rate limits that should be applied when
    /// calling this provider.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch the most recent daily bars for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker (e.g., "MARA")
    /// * `days` - How many calendar trading days to look back
    ///
    /// # Returns
    ///
    /// The bars ordered by timestamp ascending (oldest first). The provider
    /// may return fewer bars than requested, for example around holidays or
    /// for newly listed symbols.
    async fn get_daily_history(&self, symbol: &str, days: u32)
        -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch asset profile information.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The symbol to fetch profile for
    ///
    /// # Returns
    ///
    /// The asset profile. `market_cap` may be `None` when the provider has no
    /// figure for the symbol.
    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError>;
}
