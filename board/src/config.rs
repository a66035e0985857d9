use client::DEFAULT_API_BASE;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JOBS_API_BASE must be an http(s) URL, got '{0}'")]
    InvalidApiBase(String),

    #[error("JOBS_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Board configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the recruiting API, without the `/jobs` suffix
    /// Default: https://teknorix.jobsoid.com/api
    pub api_base: String,

    /// Per-request timeout
    /// Default: 15 seconds
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Optional environment variables:
    /// - JOBS_API_BASE: recruiting API base URL
    /// - JOBS_REQUEST_TIMEOUT_SECS: request timeout in seconds (default: 15)
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let api_base = match lookup("JOBS_API_BASE") {
            Some(value) if !value.trim().is_empty() => validate_api_base(value.trim())?,
            _ => defaults.api_base,
        };

        let request_timeout = match lookup("JOBS_REQUEST_TIMEOUT_SECS") {
            Some(value) if !value.trim().is_empty() => parse_timeout(&value)?,
            _ => defaults.request_timeout,
        };

        Ok(Config {
            api_base,
            request_timeout,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        api_base: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(api_base) = api_base {
            self.api_base = validate_api_base(api_base.trim())?;
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout = parse_timeout(&secs.to_string())?;
        }
        Ok(self)
    }
}

fn validate_api_base(value: &str) -> Result<String, ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::InvalidApiBase(value.to_string())),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}
