use anyhow::Context;
use gapscan_core::{ScanReport, Scanner};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::args::Args;
use crate::config::{Config, LogFormat};
use crate::output;
use crate::progress::ProgressObserver;

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// the scan result.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_scanner(config: &Config) -> anyhow::Result<Scanner> {
    let scanner = Scanner::yahoo()
        .context("Failed to initialize market data provider")?
        .with_history_days(config.history_days)
        .with_call_timeout(config.request_timeout);
    Ok(scanner)
}

/// Validate the flags, run one scan and print the result.
pub async fn run(args: &Args, config: &Config) -> anyhow::Result<ScanReport> {
    let scan_config = args.scan_config().context("Invalid scan settings")?;
    scan_config.validate().context("Invalid scan settings")?;

    let symbols = args.symbols();
    let scanner = build_scanner(config)?;
    tracing::info!(
        "Scanning {} symbols (gap >= {}%, price {}..={}, cap <= {})",
        symbols.len(),
        scan_config.min_gap_percent,
        scan_config.min_price,
        scan_config.max_price,
        scan_config.max_market_cap
    );

    let observer = ProgressObserver::new(!args.no_progress && !args.json);
    let report = scanner
        .scan_with_report(&symbols, &scan_config, &observer)
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output::render_json(&report))?);
    } else {
        println!("{}", output::render_text(&report));
    }
    Ok(report)
}
