use rust_decimal::Decimal;

/// Default minimum gap, in percent
pub const DEFAULT_MIN_GAP_PERCENT: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Default minimum price
pub const DEFAULT_MIN_PRICE: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Default maximum price
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Default maximum market cap, in billions
pub const DEFAULT_MAX_CAP_BILLIONS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Currency units per billion
pub const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Days of daily history requested per symbol, and the fewest a caller may request
pub const DEFAULT_HISTORY_DAYS: u32 = 5;

/// Fewest bars needed to compute a gap
pub const MIN_HISTORY_BARS: usize = 2;

/// Decimal precision for price and market cap display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for gap display
pub const GAP_DECIMAL_PRECISION: u32 = 1;
