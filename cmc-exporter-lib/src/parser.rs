//! (RegEx) Parser responsible for coercing the text of a listing table cell into a number.
//!
//! Cells on the listing page are formatted for humans, e.g. `$45,398.34` for a price, `18,781,675 BTC` for
//! a circulating supply or `-0.16%` for a percentage change. Each parser strips the formatting characters
//! specific to its column and parses what is left.
//!
//! Every parser comes in two flavours:
//! - `try_parse_*` returning an [`Error`] if the cell could not be parsed, used by the scraper to count
//!   malformed cells and
//! - `parse_*` which never fails and returns [`SENTINEL`] instead.

use crate::error::Error;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Value returned by the `parse_*` functions if a cell could not be parsed.
pub const SENTINEL: f64 = -1.0;

/// Signature shared by all `try_parse_*` functions.
pub type FieldParser = fn(&str) -> Result<f64, Error>;

lazy_static! {
    // Market cap cells sometimes embed an abbreviated figure in front of the exact one, e.g.
    // `$852.66B$852,656,824,242`. Greedily matching everything up to the last `$` drops the abbreviation
    // while a plain `$852,656,824,242` (a single `$`) is left untouched.
    static ref REGEX_MARKET_CAP_PREFIX: Regex = Regex::new(
        r"(?x)
            ^\$     # Leading currency symbol
            .*      # Abbreviated figure, e.g. `852.66B`
            \$      # Currency symbol of the exact figure
        ").unwrap();

    static ref REGEX_NON_DIGITS: Regex = Regex::new(r"[^0-9]+").unwrap();

    static ref REGEX_NON_SIGNED_DECIMAL: Regex = Regex::new(r"[^0-9.\-]").unwrap();
}

/// Parses `input` as is; fails on empty input and on non-finite values such as `NaN` or `inf`.
pub fn try_parse_number(input: &str) -> Result<f64, Error> {
    let value = input.parse::<f64>().map_err(|err| Error::FieldParse(input.to_string(), err))?;

    match value.is_finite() {
        true => Ok(value),
        false => Err(Error::FieldNotFinite(input.to_string())),
    }
}

/// Removes `$` and thousands separators, e.g. `$45,398.34` => `45398.34`.
pub fn try_parse_price(input: &str) -> Result<f64, Error> {
    try_parse_number(&input.replace(['$', ','], ""))
}

/// Removes an embedded abbreviated figure before handling the cell like a price, e.g.
/// `$852.66B$852,656,824,242` => `852656824242`.
pub fn try_parse_market_cap(input: &str) -> Result<f64, Error> {
    try_parse_price(&REGEX_MARKET_CAP_PREFIX.replace(input, ""))
}

/// Keeps digits only, e.g. `18,781,675 BTC` => `18781675`.
pub fn try_parse_supply(input: &str) -> Result<f64, Error> {
    try_parse_number(&REGEX_NON_DIGITS.replace_all(input, ""))
}

/// Keeps digits, decimal points and minus signs only, e.g. `-0.16%` => `-0.16`.
pub fn try_parse_percentage(input: &str) -> Result<f64, Error> {
    try_parse_number(&REGEX_NON_SIGNED_DECIMAL.replace_all(input, ""))
}

#[inline]
fn or_sentinel(result: Result<f64, Error>) -> f64 {
    result.unwrap_or_else(|why| {
        debug!("{why}");
        SENTINEL
    })
}

pub fn parse_number(input: &str) -> f64 {
    or_sentinel(try_parse_number(input))
}

pub fn parse_price(input: &str) -> f64 {
    or_sentinel(try_parse_price(input))
}

pub fn parse_market_cap(input: &str) -> f64 {
    or_sentinel(try_parse_market_cap(input))
}

pub fn parse_supply(input: &str) -> f64 {
    or_sentinel(try_parse_supply(input))
}

pub fn parse_percentage(input: &str) -> f64 {
    or_sentinel(try_parse_percentage(input))
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::parser;
    use crate::parser::SENTINEL;

    #[test]
    fn parse_number() {
        assert_eq!(parser::parse_number("45398.34"), 45398.34);
        assert_eq!(parser::parse_number("-0.16"), -0.16);
        assert_eq!(parser::parse_number("1"), 1.0);

        assert_eq!(parser::parse_number(""), SENTINEL);
        assert_eq!(parser::parse_number("1,000"), SENTINEL);
        assert_eq!(parser::parse_number(" 1"), SENTINEL);
        assert_eq!(parser::parse_number("NaN"), SENTINEL);
        assert_eq!(parser::parse_number("inf"), SENTINEL);
    }

    #[test]
    fn parse_price() {
        assert_eq!(parser::parse_price("$45,398.34"), 45398.34);
        assert_eq!(parser::parse_price("$1.47"), 1.47);
        assert_eq!(parser::parse_price("$38,394,061,287"), 38394061287.0);
        assert_eq!(parser::parse_price("$0.000006"), 0.000006);

        assert_eq!(parser::parse_price("$"), SENTINEL);
        assert_eq!(parser::parse_price("?"), SENTINEL);
    }

    #[test]
    fn parse_market_cap() {
        assert_eq!(parser::parse_market_cap("$852.66B$852,656,824,242"), 852656824242.0);
        assert_eq!(parser::parse_market_cap("$47,185,315,258"), 47185315258.0);
        assert_eq!(parser::parse_market_cap("$47.19B$47,185,315,258"), 47185315258.0);

        // Nothing is left after removing the abbreviation
        assert_eq!(parser::parse_market_cap("$852.66B$"), SENTINEL);
        assert_eq!(parser::parse_market_cap("--"), SENTINEL);
    }

    #[test]
    fn parse_supply() {
        assert_eq!(parser::parse_supply("18,781,675 BTC"), 18781675.0);
        assert_eq!(parser::parse_supply("32,112,395,093 ADA"), 32112395093.0);

        // Decimal points are dropped along with every other non-digit character
        assert_eq!(parser::parse_supply("1.5 ETH"), 15.0);

        assert_eq!(parser::parse_supply("BTC"), SENTINEL);
        assert_eq!(parser::parse_supply(""), SENTINEL);
    }

    #[test]
    fn parse_percentage() {
        assert_eq!(parser::parse_percentage("-0.16%"), -0.16);
        assert_eq!(parser::parse_percentage("4.3%"), 4.3);
        assert_eq!(parser::parse_percentage("17.76 %"), 17.76);

        assert_eq!(parser::parse_percentage("%"), SENTINEL);
        assert_eq!(parser::parse_percentage("--"), SENTINEL);
        assert_eq!(parser::parse_percentage("1.2.3%"), SENTINEL);
    }

    #[test]
    fn try_parse_errors() {
        assert!(matches!(parser::try_parse_number("abc"), Err(Error::FieldParse(..))));
        assert!(matches!(parser::try_parse_number("-inf"), Err(Error::FieldNotFinite(..))));
        assert!(matches!(parser::try_parse_supply(""), Err(Error::FieldParse(..))));
        assert_eq!(parser::try_parse_price("$1,000").unwrap(), 1000.0);
    }
}
