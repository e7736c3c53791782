//! Config manager, reading the content of the (optional) `.env` file and the process environment.
//!
//! Every variable has a default matching a public CoinMarketCap deployment, so running the exporter without
//! any configuration scrapes <https://coinmarketcap.com/all/views/all/> and listens on port 9599. Variables
//! that are set but empty are rejected rather than silently replaced by their default.

use crate::error::Error;
use dotenv::dotenv;
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Page listing all coins, e.g. <https://coinmarketcap.com/all/views/all/>.
    pub uri: String,

    /// Timeout for a single fetch of [`Config::uri`].
    pub timeout: Duration,

    /// Address the metrics endpoint binds to, e.g. `0.0.0.0:9599`.
    pub listen_address: String,

    /// Path under which metrics are exposed, e.g. `/metrics`.
    pub telemetry_path: String,
}

const ENV_VAR_URI: &str = "CMC_EXPORTER_URI";
const ENV_VAR_TIMEOUT: &str = "CMC_EXPORTER_TIMEOUT";
const ENV_VAR_LISTEN_ADDRESS: &str = "CMC_EXPORTER_LISTEN_ADDRESS";
const ENV_VAR_TELEMETRY_PATH: &str = "CMC_EXPORTER_TELEMETRY_PATH";

const DEFAULT_URI: &str = "https://coinmarketcap.com/all/views/all/";
const DEFAULT_TIMEOUT: &str = "5";
const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9599";
const DEFAULT_TELEMETRY_PATH: &str = "/metrics";

#[inline]
fn read_or_default<F>(lookup: &F, env_var: &'static str, default: &str) -> Result<String, Error>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(env_var) {
        Some(val) if val.trim().is_empty() => Err(Error::ConfigReadEmptyEnvironmentVariable(env_var)),
        Some(val) => Ok(val.trim().to_string()),
        None => Ok(default.to_string()),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    let invalid = || Error::ConfigInvalidTimeout(ENV_VAR_TIMEOUT, raw.to_string());

    let secs = raw.parse::<f64>().map_err(|_| invalid())?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }

    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

impl Config {
    /// Returns a new config manager, reading the content of `.env` if present and the process environment.
    pub fn new() -> Result<Self, Error> {
        if Path::new(".env").exists() {
            dotenv()?;
        } else if Path::new("../.env").exists() {
            dotenv::from_filename("../.env")?; // If executed within a sub-directory
        }

        Self::from_lookup(|env_var| std::env::var(env_var).ok())
    }

    /// Resolves the config against an arbitrary variable lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let uri = read_or_default(&lookup, ENV_VAR_URI, DEFAULT_URI)?;
        Url::parse(&uri).map_err(|err| Error::ConfigInvalidUrl(ENV_VAR_URI, err))?;

        let timeout = parse_timeout(&read_or_default(&lookup, ENV_VAR_TIMEOUT, DEFAULT_TIMEOUT)?)?;
        let listen_address = read_or_default(&lookup, ENV_VAR_LISTEN_ADDRESS, DEFAULT_LISTEN_ADDRESS)?;

        let telemetry_path = read_or_default(&lookup, ENV_VAR_TELEMETRY_PATH, DEFAULT_TELEMETRY_PATH)?;
        if !telemetry_path.starts_with('/') {
            return Err(Error::ConfigInvalidTelemetryPath(ENV_VAR_TELEMETRY_PATH, telemetry_path));
        }

        Ok(Config {
            uri,
            timeout,
            listen_address,
            telemetry_path,
        })
    }
}
