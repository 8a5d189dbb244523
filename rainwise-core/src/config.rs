use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Conventional config file name, used when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Station identity and request defaults, as stored in `config.json`.
///
/// Example:
/// ```json
/// {
///   "station_mac_address": "00:11:22:33:44:55",
///   "interval": "10",
///   "units": "metric"
/// }
/// ```
///
/// Immutable after construction; re-read from disk on every call that
/// supplies a config path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Hardware address of the station, the primary key of every request.
    #[serde(rename = "station_mac_address", alias = "station_max_address")]
    pub station_mac: String,
    /// Sampling granularity in minutes for recent-history requests.
    pub interval: u32,
    /// Measurement system, "english" or "metric". Casing is preserved as
    /// stored; validation case-folds later.
    pub units: String,
}

const KEY_STATION_MAC: &str = "station_mac_address";
// Misspelling used by config files written for the original client.
const KEY_STATION_MAC_LEGACY: &str = "station_max_address";
const KEY_INTERVAL: &str = "interval";
const KEY_UNITS: &str = "units";

impl StationConfig {
    /// Load a station config from a JSON file, defaulting to
    /// [`DEFAULT_CONFIG_FILE`] in the working directory.
    ///
    /// The interval value may be a JSON number or a numeric string; it is
    /// coerced to an integer either way. No range validation happens here,
    /// that is the request builder's job.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let doc: Value = serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        let station_mac = require_string(&doc, path, KEY_STATION_MAC, KEY_STATION_MAC_LEGACY)?;
        let interval = require_interval(&doc, path)?;
        let units = require_string(&doc, path, KEY_UNITS, KEY_UNITS)?;

        Ok(StationConfig {
            station_mac,
            interval,
            units,
        })
    }
}

fn lookup<'a>(doc: &'a Value, key: &'static str, alias: &'static str) -> Option<&'a Value> {
    doc.get(key).or_else(|| doc.get(alias))
}

fn require_string(
    doc: &Value,
    path: &Path,
    key: &'static str,
    alias: &'static str,
) -> Result<String> {
    let value = lookup(doc, key, alias).ok_or_else(|| Error::ConfigMissingKey {
        path: path.to_path_buf(),
        key,
    })?;

    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(Error::ConfigBadValue {
            path: path.to_path_buf(),
            key,
            expected: "a string",
            value: other.to_string(),
        }),
    }
}

fn require_interval(doc: &Value, path: &Path) -> Result<u32> {
    let value = doc
        .get(KEY_INTERVAL)
        .ok_or_else(|| Error::ConfigMissingKey {
            path: path.to_path_buf(),
            key: KEY_INTERVAL,
        })?;

    let bad_value = || Error::ConfigBadValue {
        path: path.to_path_buf(),
        key: KEY_INTERVAL,
        expected: "an integer",
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(bad_value),
        Value::String(s) => s.trim().parse::<u32>().map_err(|_| bad_value()),
        _ => Err(bad_value()),
    }
}

/// Parameters accepted by the top-level fetch operations.
///
/// "Not supplied" is modelled with `Option`, not sentinel values. At least
/// one of `config_path` and `station_mac` must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    /// Path to a config file. When set, its contents override every other
    /// field of this struct.
    pub config_path: Option<PathBuf>,
    /// Station mac address, used when no config file is given.
    pub station_mac: Option<String>,
    /// Sampling interval in minutes. Defaults to 1.
    pub interval: u32,
    /// Measurement system. Defaults to "english".
    pub units: String,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            config_path: None,
            station_mac: None,
            interval: 1,
            units: "english".to_string(),
        }
    }
}

impl FetchParams {
    /// Convenience constructor for the common no-config case.
    pub fn for_station(station_mac: impl Into<String>) -> Self {
        Self {
            station_mac: Some(station_mac.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for the config-file case.
    pub fn from_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Resolve the effective station config.
    ///
    /// Precedence: a config file, when given, wins over directly supplied
    /// parameters. With no config file the mac address is required and
    /// interval/units fall back to this struct's values.
    pub fn resolve(&self) -> Result<StationConfig> {
        if let Some(path) = &self.config_path {
            return StationConfig::load(Some(path));
        }

        let station_mac = self.station_mac.clone().ok_or(Error::MissingIdentifier)?;

        Ok(StationConfig {
            station_mac,
            interval: self.interval,
            units: self.units.clone(),
        })
    }
}
