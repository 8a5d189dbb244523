use log::debug;
use reqwest::blocking::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::FetchParams,
    error::{Error, Result},
    model::{ReadingTable, ReshapeMode},
    request::{EndpointKind, build_request_url},
};

/// Blocking client for the RainWise station data API.
///
/// Stateless across calls: each operation resolves its parameters, issues
/// exactly one GET, and decodes the body. No caching, no retry, no timeout
/// tuning beyond the transport's defaults.
#[derive(Debug, Clone, Default)]
pub struct Client {
    http: HttpClient,
    reshape: ReshapeMode,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the current-conditions reshape to positional column dropping,
    /// or back to the default name-based selection.
    pub fn with_reshape_mode(mut self, mode: ReshapeMode) -> Self {
        self.reshape = mode;
        self
    }

    /// Fetch the trailing ~48 hours of readings for a station.
    ///
    /// Parameter resolution and validation happen before any network
    /// activity; an invalid interval or units value never reaches the wire.
    pub fn get_recent_data(&self, params: &FetchParams) -> Result<ReadingTable> {
        let config = params.resolve()?;
        let url = build_request_url(
            &config.station_mac,
            EndpointKind::Recent,
            config.interval,
            &config.units,
        )?;
        self.fetch(&url)
    }

    /// Fetch the current-conditions snapshot for a station, flattened to a
    /// single row of location and measurement fields.
    ///
    /// Interval and units are validated like any other request but do not
    /// appear in the URL for this endpoint kind.
    pub fn get_current_data(&self, params: &FetchParams) -> Result<ReadingTable> {
        let config = params.resolve()?;
        let url = build_request_url(
            &config.station_mac,
            EndpointKind::Current,
            config.interval,
            &config.units,
        )?;

        let raw = self.fetch(&url)?;
        raw.flatten_current(self.reshape)
    }

    fn fetch(&self, url: &str) -> Result<ReadingTable> {
        debug!("GET {url}");

        let res = self.http.get(url).send()?;
        let status = res.status();
        let body = res.text()?;

        if !status.is_success() {
            return Err(Error::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|err| Error::Decode(format!("body is not valid JSON: {err}")))?;

        ReadingTable::from_json(value)
    }
}

/// Fetch recent readings with a one-off [`Client`].
pub fn get_recent_data(params: &FetchParams) -> Result<ReadingTable> {
    Client::new().get_recent_data(params)
}

/// Fetch flattened current conditions with a one-off [`Client`].
pub fn get_current_data(params: &FetchParams) -> Result<ReadingTable> {
    Client::new().get_current_data(params)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Failures below must surface before any network call is attempted;
    // none of these tests touch the wire.

    #[test]
    fn recent_requires_config_or_mac() {
        let err = Client::new()
            .get_recent_data(&FetchParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier));
    }

    #[test]
    fn current_requires_config_or_mac() {
        let err = Client::new()
            .get_current_data(&FetchParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier));
    }

    #[test]
    fn recent_rejects_bad_interval_before_sending() {
        let params = FetchParams {
            interval: 7,
            ..FetchParams::for_station("AA:BB")
        };
        let err = Client::new().get_recent_data(&params).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn current_rejects_bad_units_before_sending() {
        let params = FetchParams {
            units: "imperial".to_string(),
            ..FetchParams::for_station("AA:BB")
        };
        let err = Client::new().get_current_data(&params).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
