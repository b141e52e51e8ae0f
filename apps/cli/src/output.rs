//! Table and JSON rendering of scan results.

use gapscan_core::{Opportunity, ScanReport};
use serde_json::{json, Value};
use tabled::{Table, Tabled};

pub const NO_MATCHES_MESSAGE: &str = "No stocks matched your criteria right now.";
pub const UNREACHABLE_MESSAGE: &str =
    "Warning: no market data could be fetched for any symbol. The data provider may be unreachable.";

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Gap")]
    gap: String,
    #[tabled(rename = "Cap (B)")]
    cap: String,
    #[tabled(rename = "Volume")]
    volume: u64,
}

impl From<&Opportunity> for OpportunityRow {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            ticker: opportunity.symbol.to_string(),
            price: opportunity.formatted_price(),
            gap: opportunity.formatted_gap(),
            cap: opportunity.formatted_cap(),
            volume: opportunity.volume,
        }
    }
}

pub fn found_message(count: usize) -> String {
    format!("Found {} opportunities!", count)
}

pub fn render_table(opportunities: &[Opportunity]) -> String {
    Table::new(opportunities.iter().map(OpportunityRow::from)).to_string()
}

/// Full report as JSON, with raw and display values for each match.
pub fn render_json(report: &ScanReport) -> Value {
    let opportunities: Vec<Value> = report
        .opportunities
        .iter()
        .map(|o| {
            json!({
                "symbol": o.symbol,
                "price": o.price,
                "gap_percent": o.gap_percent,
                "volume": o.volume,
                "market_cap": o.market_cap,
                "display": {
                    "price": o.formatted_price(),
                    "gap": o.formatted_gap(),
                    "cap": o.formatted_cap(),
                },
            })
        })
        .collect();

    json!({
        "found": report.opportunities.len(),
        "scanned": report.scanned,
        "fetch_failures": report.fetch_failures(),
        "opportunities": opportunities,
        "skipped": report.skipped,
    })
}

/// Human-readable report for stdout.
pub fn render_text(report: &ScanReport) -> String {
    let mut lines = Vec::new();
    if report.opportunities.is_empty() {
        lines.push(NO_MATCHES_MESSAGE.to_string());
    } else {
        lines.push(found_message(report.opportunities.len()));
        lines.push(render_table(&report.opportunities));
    }
    if report.all_fetches_failed() {
        lines.push(UNREACHABLE_MESSAGE.to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapscan_core::{SkipReason, Symbol};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn report(opportunities: Vec<Opportunity>, skipped: Vec<(Symbol, SkipReason)>) -> ScanReport {
        ScanReport {
            scanned: opportunities.len() + skipped.len(),
            opportunities,
            skipped,
        }
    }

    fn sample() -> Opportunity {
        Opportunity {
            symbol: Symbol::new("A"),
            price: dec!(10.5),
            gap_percent: dec!(5),
            volume: 1200,
            market_cap: dec!(1_000_000_000),
        }
    }

    fn unreachable(symbol: &str) -> (Symbol, SkipReason) {
        (
            Symbol::new(symbol),
            SkipReason::HistoryUnavailable {
                message: "Network error".to_string(),
                transient: true,
            },
        )
    }

    #[test]
    fn test_table_columns() {
        let table = render_table(&[sample()]);
        for expected in ["Ticker", "Price", "Gap", "Cap (B)", "Volume"] {
            assert!(table.contains(expected), "missing header {}", expected);
        }
        for expected in ["A", "$10.50", "+5.0%", "$1.00B", "1200"] {
            assert!(table.contains(expected), "missing cell {}", expected);
        }
    }

    #[test]
    fn test_text_with_matches() {
        let text = render_text(&report(vec![sample()], vec![]));
        assert!(text.starts_with("Found 1 opportunities!"));
        assert!(!text.contains(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_text_without_matches() {
        let text = render_text(&report(
            vec![],
            vec![(Symbol::new("B"), SkipReason::ZeroPreviousClose)],
        ));
        assert_eq!(text, NO_MATCHES_MESSAGE);
    }

    #[test]
    fn test_text_warns_when_every_fetch_failed() {
        let text = render_text(&report(vec![], vec![unreachable("A"), unreachable("B")]));
        assert!(text.contains(NO_MATCHES_MESSAGE));
        assert!(text.contains(UNREACHABLE_MESSAGE));
    }

    #[test]
    fn test_json_shape() {
        let value = render_json(&report(vec![sample()], vec![unreachable("B")]));

        assert_eq!(value["found"], 1);
        assert_eq!(value["scanned"], 2);
        assert_eq!(value["fetch_failures"], 1);
        assert_eq!(value["opportunities"][0]["symbol"], "A");
        assert_eq!(value["opportunities"][0]["volume"], 1200);
        assert_eq!(value["opportunities"][0]["display"]["gap"], "+5.0%");
        assert_eq!(value["skipped"][0][1]["reason"], "history_unavailable");
    }

    #[test]
    fn test_json_zero_cap() {
        let mut opportunity = sample();
        opportunity.market_cap = Decimal::ZERO;
        let value = render_json(&report(vec![opportunity], vec![]));
        assert_eq!(value["opportunities"][0]["display"]["cap"], "$0.00B");
    }
}
