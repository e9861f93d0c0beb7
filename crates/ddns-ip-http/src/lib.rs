// # HTTP IP Source
//
// This crate provides an HTTP-based IP source for the DDNS system.
//
// ## Architecture
//
// Asks an external echo service (e.g., api.ipify.org) for the caller's public
// address. The service answers with the bare address as plain text.
//
// One source is bound to one address family. Family selection is done by
// the endpoint: `api.ipify.org` is only reachable over IPv4 and
// `api6.ipify.org` only over IPv6, so the answer of each reflects the
// address used for that family.
//
// ## Behaviour
//
// - One GET per `current()` call, no caching
// - Non-2xx status, unparsable body or wrong family is a discovery error

use async_trait::async_trait;
use ddns_core::config::{IpSourceConfig, TransportConfig};
use ddns_core::traits::{IpSource, IpVersion};
use ddns_core::transport::build_http_client;
use ddns_core::{Error, Result};

use std::net::IpAddr;

/// Echo-service IP source for a single address family
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// Family this source answers for
    version: IpVersion,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org")
    /// - `version`: family the endpoint answers for
    /// - `transport`: timeout and extra TLS roots
    pub fn new(url: impl Into<String>, version: IpVersion, transport: &TransportConfig) -> Result<Self> {
        let client = build_http_client(transport)?;
        Ok(Self::with_client(url, version, client))
    }

    /// Create the source for `version` from the configured endpoints
    pub fn from_config(
        config: &IpSourceConfig,
        version: IpVersion,
        transport: &TransportConfig,
    ) -> Result<Self> {
        Self::new(config.url_for(version), version, transport)
    }

    /// Create a source around an existing HTTP client
    pub fn with_client(url: impl Into<String>, version: IpVersion, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            version,
            client,
        }
    }

    /// Endpoint queried by this source
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current IP from HTTP service
    async fn fetch_ip(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::discovery(format!("{} request to {} failed: {}", self.version, self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::discovery(format!(
                "{} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let ip_text = response
            .text()
            .await
            .map_err(|e| Error::discovery(format!("Failed to read response from {}: {}", self.url, e)))?;

        let ip_text = ip_text.trim();

        let ip: IpAddr = ip_text.parse().map_err(|_| {
            Error::discovery(format!("Invalid IP address from {}: {:?}", self.url, ip_text))
        })?;

        if !self.version.matches(&ip) {
            return Err(Error::discovery(format!(
                "Expected {}, got: {}",
                self.version, ip
            )));
        }

        Ok(ip)
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let ip = self.fetch_ip().await?;
        tracing::debug!("Current {} address: {}", self.version, ip);
        Ok(ip)
    }

    fn version(&self) -> IpVersion {
        self.version
    }
}
