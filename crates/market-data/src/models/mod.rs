//! Market data models
//!
//! - `quote` - Daily bar data (Quote)
//! - `profile` - Asset profile data including market capitalization (AssetProfile)

mod profile;
mod quote;

pub use profile::AssetProfile;
pub use quote::Quote;
