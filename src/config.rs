use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_config_error, Error};

pub const DEFAULT_MAPS_API_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_ROADS_API_URL: &str = "https://roads.googleapis.com";

/// What happens to the segments after the last sampled index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Closure {
    /// One un-amortized record from the last sampled point back to the first.
    #[default]
    Loop,
    /// The trailing run is measured and amortized like any other; no record
    /// closes the path.
    Open,
}

impl FromStr for Closure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "open" => Ok(Self::Open),
            _ => Err(invalid_config_error("ROUTE_CLOSURE")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub maps_api_url: String,
    pub roads_api_url: String,
    pub threshold: usize,
    pub closure: Closure,
    pub max_in_flight: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            maps_api_url: DEFAULT_MAPS_API_URL.into(),
            roads_api_url: DEFAULT_ROADS_API_URL.into(),
            threshold: 10,
            closure: Closure::Loop,
            max_in_flight: 8,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Reads the configuration from the environment, loading `.env` first
    /// when one is present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let mut config = Self::new(env::var("GOOGLE_MAPS_API_KEY")?);

        if let Ok(url) = env::var("GOOGLE_MAPS_API_URL") {
            config.maps_api_url = url;
        }
        if let Ok(url) = env::var("GOOGLE_ROADS_API_URL") {
            config.roads_api_url = url;
        }
        if let Some(threshold) = parse_var::<usize>("VELOCITY_SAMPLE_THRESHOLD")? {
            config.threshold = threshold;
        }
        if let Some(closure) = parse_var::<Closure>("ROUTE_CLOSURE")? {
            config.closure = closure;
        }
        if let Some(max_in_flight) = parse_var::<usize>("MAX_CONCURRENT_REQUESTS")? {
            config.max_in_flight = max_in_flight;
        }
        if let Some(secs) = parse_var::<u64>("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(invalid_config_error("GOOGLE_MAPS_API_KEY"));
        }
        if self.threshold == 0 {
            return Err(invalid_config_error("VELOCITY_SAMPLE_THRESHOLD"));
        }
        if self.max_in_flight == 0 {
            return Err(invalid_config_error("MAX_CONCURRENT_REQUESTS"));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, Error> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid_config_error(name)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
