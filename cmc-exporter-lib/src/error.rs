//! Errors that might be returned when using this crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // HTTP Errors
    #[error("Failed to initialize HTTP client; {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to send HTTP request; {0}")]
    HttpRequest(#[source] reqwest::Error),

    #[error("Failed to retrieve '{0}'; server responded with status {1}")]
    HttpStatus(String, u16),

    #[error("Failed to read HTTP response body; {0}")]
    HttpBody(#[source] reqwest::Error),

    // Parser Errors
    #[error("Failed to parse '{0}' as a number; {1}")]
    FieldParse(String, #[source] std::num::ParseFloatError),

    #[error("Value '{0}' is not a finite number")]
    FieldNotFinite(String),

    // Config Errors
    #[error("Failed to read .env file; {0}")]
    ConfigRead(#[from] dotenv::Error),

    #[error("Environment variable '{0}' is empty")]
    ConfigReadEmptyEnvironmentVariable(&'static str),

    #[error("Environment variable '{0}' is not a valid URL; {1}")]
    ConfigInvalidUrl(&'static str, #[source] url::ParseError),

    #[error("Environment variable '{0}' must be a positive number of seconds, got '{1}'")]
    ConfigInvalidTimeout(&'static str, String),

    #[error("Environment variable '{0}' must start with '/', got '{1}'")]
    ConfigInvalidTelemetryPath(&'static str, String),

    // Metric Errors
    #[error("Failed to create or register metric; {0}")]
    Metric(#[from] prometheus::Error),
}
