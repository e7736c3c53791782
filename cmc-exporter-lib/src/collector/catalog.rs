//! Metrics published for every coin of a listing.
//!
//! Each entry maps one [`CoinRecord`] field onto a gauge named `cmc_coin_stats_<name>` labeled by the coin's
//! symbol. Publishing a new field requires an entry here and a matching cell in the scraper's field table.

use crate::model::CoinRecord;

pub const NAMESPACE: &str = "cmc";
pub const SUBSYSTEM: &str = "coin_stats";

pub const DEFAULT_LABELS: &[&str] = &["symbol"];

pub struct CoinMetric {
    pub name: &'static str,
    pub help: &'static str,
    pub label_names: &'static [&'static str],
    pub value: fn(&CoinRecord) -> f64,
    pub labels: fn(&str) -> Vec<&str>,
}

fn default_label_values(symbol: &str) -> Vec<&str> {
    vec![symbol]
}

pub static COIN_METRICS: [CoinMetric; 8] = [
    CoinMetric {
        name: "market_cap",
        help: "The total market value of a cryptocurrency's circulating supply.",
        value: |coin| coin.market_cap,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "price",
        help: "Price of the coin in USD.",
        value: |coin| coin.price,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "circulating_supply",
        help: "The amount of coins that are circulating in the market and are in public hands.",
        value: |coin| coin.circulating_supply,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "volume_24h",
        help: "A measure of how much of a cryptocurrency was traded in the last 24 hours.",
        value: |coin| coin.volume_24h,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "change_1h",
        help: "Percentage change in price over the last 1 hour.",
        value: |coin| coin.change_1h,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "change_24h",
        help: "Percentage change in price over the last 24 hours.",
        value: |coin| coin.change_24h,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "change_7d",
        help: "Percentage change in price over the last 7 days.",
        value: |coin| coin.change_7d,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
    CoinMetric {
        name: "rank",
        help: "Current coin position by market cap.",
        value: |coin| coin.rank,
        label_names: DEFAULT_LABELS,
        labels: default_label_values,
    },
];
