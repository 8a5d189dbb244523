use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};

/// Sampling intervals (minutes) accepted by the recent-history endpoint.
pub const ALLOWED_INTERVALS: [u32; 6] = [1, 5, 10, 15, 30, 60];

const BASE_URL: &str = "http://api.rainwise.net/main/v1.4";

/// Which RainWise resource a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Instantaneous snapshot from `get-current.php`. The default kind.
    #[default]
    Current,
    /// Trailing ~48 hours of readings from `get-recent.php`.
    Recent,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Current => "current",
            EndpointKind::Recent => "recent",
        }
    }

    pub const fn all() -> &'static [EndpointKind] {
        &[EndpointKind::Current, EndpointKind::Recent]
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EndpointKind {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "current" => Ok(EndpointKind::Current),
            "recent" => Ok(EndpointKind::Recent),
            _ => Err(Error::InvalidParameter(format!(
                "endpoint kind must be current or recent, got '{value}'"
            ))),
        }
    }
}

/// Build the request URL for `kind`.
///
/// Interval and units are validated up front for both endpoint kinds, even
/// though only recent-history URLs carry them. Malformed values are rejected
/// uniformly before any request could be issued.
///
/// The mac address is an opaque identifier; no format validation is
/// performed on it. Units reach the URL with the caller's casing.
pub fn build_request_url(
    mac: &str,
    kind: EndpointKind,
    interval: u32,
    units: &str,
) -> Result<String> {
    if !ALLOWED_INTERVALS.contains(&interval) {
        return Err(Error::InvalidParameter(format!(
            "interval must be 1, 5, 10, 15, 30, or 60, got {interval}"
        )));
    }

    let lower = units.to_lowercase();
    if lower != "english" && lower != "metric" {
        return Err(Error::InvalidParameter(format!(
            "units must be english or metric, got '{units}'"
        )));
    }

    let url = match kind {
        EndpointKind::Current => {
            format!("{BASE_URL}/get-current.php?mac={mac}&format=json")
        }
        EndpointKind::Recent => {
            format!("{BASE_URL}/get-recent.php?mac={mac}&interval={interval}&units={units}&format=json")
        }
    };

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_kind_as_str_roundtrip() {
        for kind in EndpointKind::all() {
            let s = kind.as_str();
            let parsed = EndpointKind::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn endpoint_kind_parse_is_case_insensitive() {
        assert_eq!(
            EndpointKind::try_from("Recent").expect("must parse"),
            EndpointKind::Recent
        );
    }

    #[test]
    fn unknown_endpoint_kind_error() {
        let err = EndpointKind::try_from("forecast").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("endpoint kind"));
    }

    #[test]
    fn default_endpoint_kind_is_current() {
        assert_eq!(EndpointKind::default(), EndpointKind::Current);
    }

    #[test]
    fn rejects_intervals_outside_allowed_set() {
        for interval in [0, 2, 3, 7, 20, 45, 61, 120] {
            let err = build_request_url("AA:BB", EndpointKind::Recent, interval, "english")
                .unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "interval {interval}");
        }
    }

    #[test]
    fn rejects_unknown_units() {
        for units in ["imperial", "si", "", "english "] {
            let err = build_request_url("AA:BB", EndpointKind::Recent, 1, units).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "units '{units}'");
        }
    }

    #[test]
    fn units_check_is_case_insensitive() {
        for units in ["English", "METRIC", "metric"] {
            build_request_url("AA:BB", EndpointKind::Recent, 1, units)
                .expect("mixed-case units must be accepted");
        }
    }

    #[test]
    fn validates_interval_and_units_even_for_current() {
        let err = build_request_url("AA:BB", EndpointKind::Current, 7, "english").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = build_request_url("AA:BB", EndpointKind::Current, 1, "imperial").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn current_url_carries_only_mac_and_format() {
        let url = build_request_url("AA:BB", EndpointKind::Current, 1, "english")
            .expect("url must build");

        assert!(url.contains("get-current.php"));
        assert!(url.contains("mac=AA:BB"));
        assert!(url.contains("format=json"));
        assert!(!url.contains("interval="));
        assert!(!url.contains("units="));
    }

    #[test]
    fn recent_url_is_fully_parameterized() {
        let url = build_request_url("AA:BB", EndpointKind::Recent, 5, "metric")
            .expect("url must build");

        assert_eq!(
            url,
            "http://api.rainwise.net/main/v1.4/get-recent.php?mac=AA:BB&interval=5&units=metric&format=json"
        );
    }

    #[test]
    fn recent_url_preserves_units_casing() {
        let url = build_request_url("AA:BB", EndpointKind::Recent, 1, "Metric")
            .expect("url must build");
        assert!(url.contains("units=Metric"));
    }
}
