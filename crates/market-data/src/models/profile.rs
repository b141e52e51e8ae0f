use serde::{Deserialize, Serialize};

/// Asset profile data from market data providers
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetProfile {
    /// Company/asset name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Trading currency (ISO 4217)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Market capitalization in currency units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl AssetProfile {
    /// Create a new empty asset profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile with basic info
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the market capitalization
    pub fn market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }
}
