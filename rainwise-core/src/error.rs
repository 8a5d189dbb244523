use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the RainWise client.
///
/// Every failure is raised synchronously to the immediate caller. There is
/// no retry, recovery, or partial-result fallback anywhere in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required configuration key is absent.
    #[error("config file {path} is missing required key '{key}'")]
    ConfigMissingKey { path: PathBuf, key: &'static str },

    /// A configuration value has the wrong type, e.g. a non-numeric interval.
    #[error("config key '{key}' in {path} must be {expected}, got {value}")]
    ConfigBadValue {
        path: PathBuf,
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    /// Interval, units, or endpoint kind outside the allowed set.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Neither a config file nor a station mac address was supplied.
    #[error("either a config file or a station mac address must be supplied")]
    MissingIdentifier,

    /// Transport-level failure from the HTTP client.
    #[error("request to RainWise failed: {0}")]
    Network(#[from] reqwest::Error),

    /// RainWise answered with a non-success status code.
    #[error("RainWise request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not valid JSON or not shaped as expected.
    #[error("failed to decode RainWise response: {0}")]
    Decode(String),

    /// The current-conditions reshape could not locate the fields it needs.
    #[error("unexpected current-conditions shape: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the config-file family of failures.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ConfigRead { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigMissingKey { .. }
                | Error::ConfigBadValue { .. }
        )
    }
}
