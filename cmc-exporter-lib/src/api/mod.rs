//! HTTP plumbing and the CoinMarketCap page client.

use crate::error::Error;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header;
use std::time::Duration;

pub mod coinmarketcap;

const USER_AGENT: &str = concat!("cmc-exporter/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around a blocking [`Client`] issuing exactly one request per call, i.e. without any retries.
pub struct RequestHandler {
    client: Client,
}

impl RequestHandler {
    /// Returns a new request handler where every request (connect, send and body read) is bounded by
    /// `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(RequestHandler { client })
    }

    /// Sends a GET request to `url`, returning the response body if the server responded with a 200.
    pub fn get_text(&self, url: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html")
            .send()
            .map_err(Error::HttpRequest)?;

        let status = response.status().as_u16();
        debug!("GET {url} responded with {status}");

        match status {
            200 => response.text().map_err(Error::HttpBody),
            _ => Err(Error::HttpStatus(url.to_string(), status)),
        }
    }
}
