//! CoinMarketCap page client.
//!
//! Downloads the listing page (by default <https://coinmarketcap.com/all/views/all/>) and extracts one
//! [`CoinRecord`] per table row. Cells are identified by their `cmc-table__cell--sort-by__*` class and routed
//! through the parser matching their formatting, see [`FIELD_CELLS`].

use crate::error::Error;
use crate::model::CoinRecord;
use crate::model::Field;
use crate::model::Listing;
use crate::parser;
use crate::parser::FieldParser;
use log::debug;
use select::document::Document;
use select::node::Node;
use select::predicate::Class;
use select::predicate::Name;
use select::predicate::Predicate;
use std::time::Duration;

use super::RequestHandler;

/// Rows without a (non-empty) name cell are headers, ads or spacers.
const CLASS_NAME: &str = "cmc-table__column-name";
const CLASS_RANK: &str = "cmc-table__cell--sort-by__rank";
const CLASS_SYMBOL: &str = "cmc-table__cell--sort-by__symbol";

/// Measurement cells and the parser handling their formatting. The volume shares the price's currency
/// formatting, hence the same parser.
#[rustfmt::skip]
const FIELD_CELLS: [(Field, &str, FieldParser); 7] = [
    (Field::MarketCap,          "cmc-table__cell--sort-by__market-cap",          parser::try_parse_market_cap),
    (Field::Price,              "cmc-table__cell--sort-by__price",               parser::try_parse_price),
    (Field::CirculatingSupply,  "cmc-table__cell--sort-by__circulating-supply",  parser::try_parse_supply),
    (Field::Volume24h,          "cmc-table__cell--sort-by__volume-24-h",         parser::try_parse_price),
    (Field::Change1h,           "cmc-table__cell--sort-by__percent-change-1-h",  parser::try_parse_percentage),
    (Field::Change24h,          "cmc-table__cell--sort-by__percent-change-24-h", parser::try_parse_percentage),
    (Field::Change7d,           "cmc-table__cell--sort-by__percent-change-7-d",  parser::try_parse_percentage),
];

pub struct CoinMarketCapClient {
    request_handler: RequestHandler,
    url: String,
}

impl CoinMarketCapClient {
    /// Returns a new client scraping `url`, where each fetch is bounded by `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        Ok(CoinMarketCapClient {
            request_handler: RequestHandler::new(timeout)?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the listing page once and returns all coins found on it. Fails only if the page itself could
    /// not be retrieved; malformed cells are replaced by fallback values and counted in the [`Listing`].
    pub fn get_listing(&self) -> Result<Listing, Error> {
        let html = self.request_handler.get_text(&self.url)?;
        Ok(parse_listing(&html))
    }
}

/// Extracts all coins from the listing page's table body.
pub fn parse_listing(html: &str) -> Listing {
    let document = Document::from(html);
    let mut listing = Listing::default();

    for row in document.find(Name("tbody").descendant(Name("tr"))) {
        if cell_text(&row, CLASS_NAME).is_empty() {
            continue;
        }

        let (coin, parse_failures) = parse_row(&row);
        listing.coins.push(coin);
        listing.parse_failures += parse_failures;
    }

    listing
}

/// Returns the coin of a single row alongside the number of cells that failed to parse.
fn parse_row(row: &Node) -> (CoinRecord, u64) {
    let mut parse_failures = 0;
    let mut coin = CoinRecord {
        symbol: cell_text(row, CLASS_SYMBOL),
        ..Default::default()
    };

    coin.rank = match parser::try_parse_number(&cell_text(row, CLASS_RANK)) {
        Ok(rank) => rank,
        Err(why) => {
            debug!("Failed to parse rank of '{}'; {why}", coin.symbol);
            parse_failures += 1;
            0.0
        }
    };

    for (field, class, parse) in FIELD_CELLS {
        let value = match parse(&cell_text(row, class)) {
            Ok(value) => value,
            Err(why) => {
                debug!("Failed to parse {field:?} of '{}'; {why}", coin.symbol);
                parse_failures += 1;
                parser::SENTINEL
            }
        };

        *coin.field_mut(field) = value;
    }

    (coin, parse_failures)
}

/// Concatenated and trimmed text of all descendants of `row` carrying `class`; empty if there are none.
fn cell_text(row: &Node, class: &str) -> String {
    row.find(Class(class)).map(|node| node.text()).collect::<String>().trim().to_string()
}
