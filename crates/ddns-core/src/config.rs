//! Configuration types for the DDNS system
//!
//! This module defines all configuration structures used throughout the crate.
//! Every endpoint and transport knob is passed explicitly into constructors;
//! nothing is read from process-wide globals except in [`TransportConfig::from_env`].

use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::record::expand_record_names;
use crate::traits::IpVersion;
use crate::validate::{validate_record_name, validate_zone};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default TTL written with records (seconds)
pub const DEFAULT_TTL_SECS: u32 = 300;

/// Gandi LiveDNS v5 API base URL
pub const DEFAULT_API_URL: &str = "https://api.gandi.net/v5/livedns";

/// IPv4-only echo service
pub const DEFAULT_IPV4_URL: &str = "https://api.ipify.org";

/// IPv6-only echo service
pub const DEFAULT_IPV6_URL: &str = "https://api6.ipify.org";

/// Default HTTP timeout for every outgoing request (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable naming an extra PEM bundle of trusted roots
pub const SSL_CERT_FILE_ENV: &str = "SSL_CERT_FILE";

/// Environment variable naming a directory of extra trusted roots
pub const SSL_CERT_DIR_ENV: &str = "SSL_CERT_DIR";

const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// What one invocation should do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Zone to update (e.g. "example.com")
    pub zone: String,

    /// Raw record tokens (names, or one comma-joined token)
    pub records: Vec<String>,

    /// TTL for created/updated records
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u32,

    /// Skip the A record pass
    #[serde(default)]
    pub skip_ipv4: bool,

    /// Skip the AAAA record pass
    #[serde(default)]
    pub skip_ipv6: bool,

    /// Read and compare only; never write
    #[serde(default)]
    pub dry_run: bool,
}

impl RunConfig {
    /// Create a run configuration with defaults (both families, live mode)
    pub fn new(zone: impl Into<String>, records: Vec<String>) -> Self {
        Self {
            zone: zone.into(),
            records,
            ttl_secs: DEFAULT_TTL_SECS,
            skip_ipv4: false,
            skip_ipv6: false,
            dry_run: false,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl_secs: u32) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Skip the IPv4 pass
    pub fn with_skip_ipv4(mut self, skip: bool) -> Self {
        self.skip_ipv4 = skip;
        self
    }

    /// Skip the IPv6 pass
    pub fn with_skip_ipv6(mut self, skip: bool) -> Self {
        self.skip_ipv6 = skip;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Address families to process, in processing order
    pub fn enabled_versions(&self) -> Vec<IpVersion> {
        let mut versions = Vec::with_capacity(2);
        if !self.skip_ipv4 {
            versions.push(IpVersion::V4);
        }
        if !self.skip_ipv6 {
            versions.push(IpVersion::V6);
        }
        versions
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_zone(&self.zone)?;

        if self.records.is_empty() {
            return Err(Error::config("At least one record is required"));
        }

        for name in expand_record_names(&self.records) {
            validate_record_name(&name)?;
        }

        if self.ttl_secs == 0 {
            return Err(Error::config("TTL must be greater than 0"));
        }

        Ok(())
    }
}

fn default_ttl_secs() -> u32 {
    DEFAULT_TTL_SECS
}

/// DNS provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Bearer credential (masked in Debug)
    pub credential: Credential,
}

impl ProviderConfig {
    /// Create a provider configuration against the default API URL
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            credential,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<()> {
        validate_http_url("API URL", &self.base_url)
    }
}

/// Public IP discovery endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSourceConfig {
    /// Echo service answering over IPv4 only
    pub ipv4_url: String,

    /// Echo service answering over IPv6 only
    pub ipv6_url: String,
}

impl IpSourceConfig {
    /// Endpoint for the given family
    pub fn url_for(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.ipv4_url,
            IpVersion::V6 => &self.ipv6_url,
        }
    }

    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<()> {
        validate_http_url("IPv4 echo URL", &self.ipv4_url)?;
        validate_http_url("IPv6 echo URL", &self.ipv6_url)
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        Self {
            ipv4_url: DEFAULT_IPV4_URL.to_string(),
            ipv6_url: DEFAULT_IPV6_URL.to_string(),
        }
    }
}

/// HTTP transport settings shared by every client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Per-request timeout (seconds)
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra PEM bundle of trusted roots
    #[serde(default)]
    pub ca_file: Option<PathBuf>,

    /// Directory of extra trusted roots
    #[serde(default)]
    pub ca_dir: Option<PathBuf>,
}

impl TransportConfig {
    /// Transport settings with TLS overrides taken from
    /// `SSL_CERT_FILE` / `SSL_CERT_DIR` (empty values are ignored)
    pub fn from_env() -> Self {
        let path_from_env = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            ca_file: path_from_env(SSL_CERT_FILE_ENV),
            ca_dir: path_from_env(SSL_CERT_DIR_ENV),
            ..Self::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the transport configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("HTTP timeout must be greater than 0"));
        }
        Ok(())
    }

    /// Load the extra trusted roots as PEM documents
    ///
    /// `ca_file` is returned as one bundle; from `ca_dir` every regular file
    /// containing a PEM certificate is returned, sorted by file name.
    pub fn root_certificates(&self) -> Result<Vec<Vec<u8>>> {
        let mut pems = Vec::new();

        if let Some(ref file) = self.ca_file {
            let pem = read_pem(file)?;
            if !contains_certificate(&pem) {
                return Err(Error::config(format!(
                    "{} does not contain a PEM certificate",
                    file.display()
                )));
            }
            pems.push(pem);
        }

        if let Some(ref dir) = self.ca_dir {
            let mut paths = std::fs::read_dir(dir)
                .map_err(|e| {
                    Error::config(format!("Cannot read CA directory {}: {}", dir.display(), e))
                })?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file())
                .collect::<Vec<_>>();
            paths.sort();

            for path in paths {
                let pem = read_pem(&path)?;
                if contains_certificate(&pem) {
                    pems.push(pem);
                } else {
                    tracing::debug!("Skipping non-PEM file in CA directory: {}", path.display());
                }
            }
        }

        Ok(pems)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            ca_file: None,
            ca_dir: None,
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| Error::config(format!("Cannot read {}: {}", path.display(), e)))
}

fn contains_certificate(pem: &[u8]) -> bool {
    String::from_utf8_lossy(pem).contains(PEM_CERTIFICATE_MARKER)
}

fn validate_http_url(what: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::config(format!("{} cannot be empty", what)));
    }

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(Error::config(format!(
            "{} must use HTTP or HTTPS scheme. Got: {}",
            what, url
        )));
    }

    if url.starts_with("http://") {
        tracing::warn!("{} uses HTTP (not HTTPS): {}", what, url);
    }

    Ok(())
}
