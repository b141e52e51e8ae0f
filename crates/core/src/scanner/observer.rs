//! Progress callbacks for scan drivers.

use super::model::Symbol;
use super::skip::{ScanReport, SymbolOutcome};

/// Passive observer of a running scan.
///
/// Drivers implement this to show progress. Callbacks run inline on the
/// scanning task and must not block.
pub trait ScanObserver: Send + Sync {
    /// Called before `symbol` is fetched. `index` is zero-based.
    fn on_symbol_start(&self, index: usize, total: usize, symbol: &Symbol) {
        let _ = (index, total, symbol);
    }

    /// Called once `symbol` has been evaluated.
    fn on_symbol_done(&self, symbol: &Symbol, outcome: &SymbolOutcome) {
        let _ = (symbol, outcome);
    }

    /// Called after ranking, before the report is returned.
    fn on_scan_complete(&self, report: &ScanReport) {
        let _ = report;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
