//! Ticker universe.

use super::model::Symbol;

/// Default tickers scanned when the driver supplies none.
///
/// Small and mid caps that tend to gap: crypto miners, speculative tech,
/// EV makers, space, fintech and meme names.
pub const DEFAULT_UNIVERSE: &[&str] = &[
    "MARA", "RIOT", "CLSK", "HUT", "BITF", "IREN", "WULF", "CIFR", "BTBT", "MSTR", "COIN", "PLTR",
    "SOFI", "AI", "BBAI", "SOUN", "IONQ", "LCID", "RIVN", "NKLA", "GOEV", "PSNY", "NIO", "XPEV",
    "LI", "QS", "RKLB", "ASTS", "LUNR", "SPCE", "HOOD", "UPST", "AFRM", "OPEN", "DKNG", "AMC",
    "GME", "BB", "TLRY", "CGC", "SNDL", "DNA", "CRSP", "NTLA",
];

/// The default universe as symbols, in list order.
pub fn default_symbols() -> Vec<Symbol> {
    DEFAULT_UNIVERSE.iter().map(|s| Symbol::new(s)).collect()
}

/// Parse a comma or whitespace separated ticker list.
///
/// Empty entries are dropped and duplicates keep their first position.
pub fn parse_symbol_list(input: &str) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = Vec::new();
    for part in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.trim().is_empty() {
            continue;
        }
        let symbol = Symbol::new(part);
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}
