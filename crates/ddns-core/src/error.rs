//! Error types for the DDNS system
//!
//! This module defines all error types used throughout the crate.
//!
//! Two layers exist:
//! - [`ProviderError`]: what a single provider HTTP call can fail with
//! - [`Error`]: everything the reconciler, IP sources and configuration
//!   layer can report

use crate::record::RecordType;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single provider API call
///
/// "Record not found" is NOT represented here: a read that finds nothing
/// returns `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("HTTP {status}{}: {body}", status_hint(.status))]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The provider answered 2xx but the body could not be decoded
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API error from a status code and body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// HTTP status of the failed call, if the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_hint(status: &u16) -> &'static str {
    match *status {
        401 | 403 => " (invalid API token or insufficient permissions)",
        409 => " (conflicting record)",
        429 => " (rate limited)",
        500..=599 => " (provider server error)",
        _ => "",
    }
}

/// Core error type for the DDNS system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors, detected before any network activity
    #[error("Configuration error: {0}")]
    Config(String),

    /// Public IP discovery errors
    #[error("IP discovery error: {0}")]
    Discovery(String),

    /// A provider call failed while processing one record
    #[error("{record_type} record {name} in zone {zone}: {source}")]
    Record {
        /// Zone being reconciled
        zone: String,
        /// Record name being processed
        name: String,
        /// Record type of the pass
        record_type: RecordType,
        /// Underlying provider failure
        #[source]
        source: ProviderError,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an IP discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Attach record context to a provider failure
    pub fn record(
        zone: impl Into<String>,
        name: impl Into<String>,
        record_type: RecordType,
        source: ProviderError,
    ) -> Self {
        Self::Record {
            zone: zone.into(),
            name: name.into(),
            record_type,
            source,
        }
    }

    /// Whether this error was raised before any network call was attempted
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
