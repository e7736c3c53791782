//! Structs produced by the page scraper and consumed by the metric collector.

/// A single row of the coin listing table.
///
/// Every numeric field falls back to [`crate::parser::SENTINEL`] if its cell could not be parsed, except
/// `rank` which falls back to `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinRecord {
    pub rank: f64,
    pub symbol: String,
    pub market_cap: f64,
    pub price: f64,
    pub circulating_supply: f64,
    pub volume_24h: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
}

/// Measurement columns of the listing table, i.e. every numeric column except the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MarketCap,
    Price,
    CirculatingSupply,
    Volume24h,
    Change1h,
    Change24h,
    Change7d,
}

impl CoinRecord {
    pub fn field_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::MarketCap => &mut self.market_cap,
            Field::Price => &mut self.price,
            Field::CirculatingSupply => &mut self.circulating_supply,
            Field::Volume24h => &mut self.volume_24h,
            Field::Change1h => &mut self.change_1h,
            Field::Change24h => &mut self.change_24h,
            Field::Change7d => &mut self.change_7d,
        }
    }
}

/// Coins extracted from one fetched page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub coins: Vec<CoinRecord>,

    /// Number of cells that could not be parsed and were replaced by a fallback value.
    pub parse_failures: u64,
}
