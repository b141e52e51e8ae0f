use std::time::Duration;

use gapscan_core::{ScanObserver, ScanReport, Symbol, SymbolOutcome};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar on stderr driven by scanner events.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) =
            ProgressStyle::default_bar().template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl ScanObserver for ProgressObserver {
    fn on_symbol_start(&self, index: usize, total: usize, symbol: &Symbol) {
        self.bar.set_length(total as u64);
        self.bar.set_position(index as u64);
        self.bar.set_message(format!("Scanning {}...", symbol));
    }

    fn on_symbol_done(&self, _symbol: &Symbol, _outcome: &SymbolOutcome) {
        self.bar.inc(1);
    }

    fn on_scan_complete(&self, _report: &ScanReport) {
        self.bar.finish_and_clear();
    }
}
