//! Core library for the `rainwise` CLI.
//!
//! This crate defines:
//! - Station configuration loading and parameter resolution
//! - Request URL construction and validation for the RainWise API
//! - A blocking fetch client returning lightweight reading tables
//!
//! It is used by `rainwise-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod request;

pub use client::{Client, get_current_data, get_recent_data};
pub use config::{DEFAULT_CONFIG_FILE, FetchParams, StationConfig};
pub use error::{Error, Result};
pub use model::{ReadingTable, ReshapeMode};
pub use request::{ALLOWED_INTERVALS, EndpointKind, build_request_url};
