use clap::Parser;
use gapscan_core::{default_symbols, parse_symbol_list, ScanConfig, Symbol};
use rust_decimal::Decimal;

/// Lowest accepted `--min-gap`
const MIN_GAP_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 0);
/// Highest accepted `--min-gap`
const MIN_GAP_CEILING: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Parser, Debug)]
#[command(name = "gapscan")]
#[command(version, about = "Scan small and mid cap stocks for day-over-day price gaps", long_about = None)]
pub struct Args {
    /// Minimum gap in percent (1 to 20)
    #[arg(long, value_name = "PCT", default_value = "3.0", value_parser = parse_min_gap)]
    pub min_gap: Decimal,

    /// Minimum current price in USD
    #[arg(long, value_name = "USD", default_value = "2.0")]
    pub min_price: Decimal,

    /// Maximum current price in USD
    #[arg(long, value_name = "USD", default_value = "50.0")]
    pub max_price: Decimal,

    /// Maximum market cap in billions of USD
    #[arg(long = "max-cap-b", value_name = "BILLIONS", default_value = "5.0")]
    pub max_cap_billions: Decimal,

    /// Comma separated tickers to scan instead of the default list
    #[arg(long, value_name = "A,B,...")]
    pub symbols: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn scan_config(&self) -> gapscan_core::Result<ScanConfig> {
        ScanConfig::new(
            self.min_gap,
            self.min_price,
            self.max_price,
            Decimal::ZERO,
        )
        .with_max_cap_billions(self.max_cap_billions)
    }

    /// Tickers to scan. An override that parses to nothing falls back to the
    /// default list.
    pub fn symbols(&self) -> Vec<Symbol> {
        match self.symbols.as_deref().map(parse_symbol_list) {
            Some(symbols) if !symbols.is_empty() => symbols,
            _ => default_symbols(),
        }
    }
}

fn parse_min_gap(value: &str) -> Result<Decimal, String> {
    let gap: Decimal = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if gap < MIN_GAP_FLOOR || gap > MIN_GAP_CEILING {
        return Err(format!(
            "must be between {} and {}, got {}",
            MIN_GAP_FLOOR, MIN_GAP_CEILING, gap
        ));
    }
    Ok(gap)
}
