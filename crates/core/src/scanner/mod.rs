//! Gap scanner module.
//!
//! - [`model`] - Scan configuration, symbols and opportunities
//! - [`skip`] - Why a symbol produced no opportunity, and the scan report
//! - [`observer`] - Progress callbacks for drivers
//! - [`universe`] - The default ticker list and symbol list parsing
//! - [`service`] - The scanner itself
//!
//! # Flow
//!
//! ```text
//! symbols ─▶ Scanner ─▶ per symbol: history ─▶ gap/price filter ─▶ profile ─▶ cap filter
//!                │                                                              │
//!                └──────────── ScanReport { opportunities, skipped } ◀───────────┘
//! ```
//!
//! Each symbol folds into `Result<Opportunity, SkipReason>`; provider
//! failures never abort the scan.

pub mod model;
pub mod observer;
pub mod service;
pub mod skip;
pub mod universe;


pub use model::{Opportunity, ScanConfig, Symbol};
pub use observer::{NoopObserver, ScanObserver};
pub use service::{gap_percent, screen_history, ScreenedBar, Scanner};
pub use skip::{ScanReport, SkipReason, SymbolOutcome};
pub use universe::{default_symbols, parse_symbol_list, DEFAULT_UNIVERSE};
