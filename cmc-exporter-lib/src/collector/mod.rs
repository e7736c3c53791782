//! Prometheus collector scraping CoinMarketCap whenever it is collected.
//!
//! Every call to [`Collector::collect`] fetches the listing page once and publishes one gauge per coin and
//! [`catalog::COIN_METRICS`] entry, followed by the scrape health metrics:
//! - `cmc_coin_stats_up`, whether or not the last scrape succeeded,
//! - `cmc_coin_stats_total_scrapes`, incremented on every collect regardless of the outcome and
//! - `cmc_coin_stats_html_parse_failures`, the number of cells that could not be parsed so far.
//!
//! A failed scrape is never returned to the caller, it only sets `up` to 0 and is logged.

use crate::api::coinmarketcap::CoinMarketCapClient;
use crate::error::Error;
use crate::model::CoinRecord;
use catalog::CoinMetric;
use catalog::COIN_METRICS;
use catalog::NAMESPACE;
use catalog::SUBSYSTEM;
use log::debug;
use log::error;
use log::warn;
use prometheus::core::Collector;
use prometheus::core::Desc;
use prometheus::proto::MetricFamily;
use prometheus::Counter;
use prometheus::Gauge;
use prometheus::GaugeVec;
use prometheus::Opts;
use std::collections::HashMap;
use std::time::Duration;

pub mod catalog;

struct CoinGauge {
    metric: &'static CoinMetric,
    opts: Opts,
    desc: Desc,
}

pub struct CoinStats {
    client: CoinMarketCapClient,

    up: Gauge,
    total_scrapes: Counter,
    html_parse_failures: Counter,

    coin_gauges: Vec<CoinGauge>,
}

#[inline]
fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE).subsystem(SUBSYSTEM)
}

impl CoinStats {
    /// Returns a new collector scraping `url`, where each scrape is bounded by `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        Self::with_client(CoinMarketCapClient::new(url, timeout)?)
    }

    pub fn with_client(client: CoinMarketCapClient) -> Result<Self, Error> {
        let mut coin_gauges = Vec::with_capacity(COIN_METRICS.len());
        for metric in COIN_METRICS.iter() {
            let opts = opts(metric.name, metric.help);
            let desc = Desc::new(
                opts.fq_name(),
                metric.help.to_string(),
                metric.label_names.iter().map(|label| label.to_string()).collect(),
                HashMap::new(),
            )?;

            coin_gauges.push(CoinGauge { metric, opts, desc });
        }

        Ok(CoinStats {
            client,
            up: Gauge::with_opts(opts("up", "Was the last scrape of the website successful."))?,
            total_scrapes: Counter::with_opts(opts("total_scrapes", "Current total website scrapes."))?,
            html_parse_failures: Counter::with_opts(opts(
                "html_parse_failures",
                "Number of errors while parsing HTML.",
            ))?,
            coin_gauges,
        })
    }

    /// Builds one family per catalog entry holding a sample for every coin. The gauges are created per
    /// collect so that concurrent collects never share (and reset) each other's samples.
    fn coin_families(&self, coins: &[CoinRecord]) -> Vec<MetricFamily> {
        if coins.is_empty() {
            return Vec::new();
        }

        let mut families = Vec::with_capacity(self.coin_gauges.len());
        for coin_gauge in &self.coin_gauges {
            let metric = coin_gauge.metric;

            let gauges = match GaugeVec::new(coin_gauge.opts.clone(), metric.label_names) {
                Ok(gauges) => gauges,
                Err(why) => {
                    error!("Failed to create gauge '{}'; {why}", coin_gauge.desc.fq_name);
                    continue;
                }
            };

            for coin in coins {
                match gauges.get_metric_with_label_values(&(metric.labels)(&coin.symbol)) {
                    Ok(gauge) => gauge.set((metric.value)(coin)),
                    Err(why) => error!("Failed to set '{}' of '{}'; {why}", coin_gauge.desc.fq_name, coin.symbol),
                }
            }

            families.extend(gauges.collect());
        }

        families
    }
}

impl Collector for CoinStats {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs: Vec<&Desc> = self.coin_gauges.iter().map(|coin_gauge| &coin_gauge.desc).collect();

        descs.extend(self.up.desc());
        descs.extend(self.total_scrapes.desc());
        descs.extend(self.html_parse_failures.desc());

        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.total_scrapes.inc();

        let mut families = match self.client.get_listing() {
            Ok(listing) => {
                debug!(
                    "Scraped {} coins from '{}' ({} parse failures)",
                    listing.coins.len(),
                    self.client.url(),
                    listing.parse_failures
                );

                self.up.set(1.0);
                self.html_parse_failures.inc_by(listing.parse_failures as f64);
                self.coin_families(&listing.coins)
            }

            Err(why) => {
                warn!("Failed to fetch and decode coin stats from '{}'; {why}", self.client.url());
                self.up.set(0.0);
                Vec::new()
            }
        };

        families.extend(self.up.collect());
        families.extend(self.total_scrapes.collect());
        families.extend(self.html_parse_failures.collect());

        families
    }
}
