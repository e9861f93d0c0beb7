//! Shared HTTP client construction
//!
//! Every outgoing client (provider API, IP echo services) is built here so
//! timeouts and extra trusted roots apply uniformly.

use crate::config::TransportConfig;
use crate::error::{Error, Result};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("ddns/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` honoring `transport`
///
/// Extra roots from `SSL_CERT_FILE` / `SSL_CERT_DIR` are added on top of the
/// default trust store; an unreadable or unparsable root is a configuration
/// error.
pub fn build_http_client(transport: &TransportConfig) -> Result<reqwest::Client> {
    transport.validate()?;

    let mut builder = reqwest::Client::builder()
        .timeout(transport.timeout())
        .user_agent(USER_AGENT);

    for pem in transport.root_certificates()? {
        let certs = reqwest::Certificate::from_pem_bundle(&pem)
            .map_err(|e| Error::config(format!("Invalid CA certificate: {}", e)))?;

        tracing::debug!("Adding {} extra trusted root(s)", certs.len());
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
    }

    builder
        .build()
        .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))
}
