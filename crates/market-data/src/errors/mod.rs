//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// The scanner treats every variant the same way (the symbol is skipped),
/// but the variants are kept distinct so that logs and scan reports can say
/// *why* a ticker produced no data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested range.
    /// The symbol exists but has no bars in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the error is likely to go away on its own.
    ///
    /// Transient errors point at the provider (throttling, timeouts, network)
    /// rather than at the symbol. The scan does not retry, but the driver uses
    /// this to tell an unreachable provider apart from bad tickers.
    ///
    /// # Examples
    ///
    /// ```
    /// use gapscan_market_data::MarketDataError;
    ///
    /// let error = MarketDataError::RateLimited { provider: "YAHOO".to_string() };
    /// assert!(error.is_transient());
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert!(!error.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => true,
            Self::ProviderError { .. } => true,
            Self::SymbolNotFound(_) | Self::NoDataForRange | Self::ValidationFailed { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_is_not_transient() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert!(!error.is_transient());
    }

    #[test]
    fn test_no_data_for_range_is_not_transient() {
        assert!(!MarketDataError::NoDataForRange.is_transient());
    }

    #[test]
    fn test_validation_failed_is_not_transient() {
        let error = MarketDataError::ValidationFailed {
            message: "close is NaN".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_timeout_and_rate_limit_are_transient() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert!(error.is_transient());

        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_provider_error_is_transient() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "Internal server error".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: YAHOO");

        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "Yahoo authentication expired".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: YAHOO - Yahoo authentication expired"
        );
    }
}
