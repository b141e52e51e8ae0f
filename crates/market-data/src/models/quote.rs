use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily bar for a symbol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the bar (start of the trading day)
    pub timestamp: DateTime<Utc>,

    /// Closing price, or the latest price for the current session
    pub close: Decimal,

    /// Trading volume
    pub volume: u64,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(
        timestamp: DateTime<Utc>,
        close: Decimal,
        volume: u64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            close,
            volume,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new(Utc::now(), dec!(10.50), 1200, "YAHOO");
        assert_eq!(quote.close, dec!(10.50));
        assert_eq!(quote.volume, 1200);
        assert_eq!(quote.source, "YAHOO");
    }

    #[test]
    fn test_quote_serialization_keeps_volume_integral() {
        let quote = Quote::new(Utc::now(), dec!(2.5), 500, "YAHOO");
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"volume\":500"));
    }
}
