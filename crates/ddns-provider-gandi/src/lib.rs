// # Gandi LiveDNS Provider
//
// This crate provides a Gandi LiveDNS (API v5) provider implementation for
// the DDNS system.
//
// ## Behaviour
//
// - ✅ One HTTP request per trait call
// - ✅ "Not found" on read mapped to `Ok(None)`, never to an error
// - ✅ Non-2xx responses surfaced with status and body for diagnostics
// - ✅ Create (POST) and full-replace update (PUT) of single-value rrsets
// - ❌ NO retry logic (a failed call fails the pass)
// - ❌ NO caching (every read hits the API)
// - ❌ NO dry-run logic (owned by the Reconciler, which never calls
//   `write_record` in dry-run mode)
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - API token is validated for shape before the provider can be built
//
// ## API Reference
//
// - Gandi LiveDNS: https://api.gandi.net/docs/livedns/
// - Read rrset:   GET  `{base}/domains/:zone/records/:name/:type`
// - Create rrset: POST `{base}/domains/:zone/records/:name/:type`
// - Replace rrset: PUT `{base}/domains/:zone/records/:name/:type`

use async_trait::async_trait;
use ddns_core::config::{ProviderConfig, TransportConfig};
use ddns_core::traits::DnsProvider;
use ddns_core::transport::build_http_client;
use ddns_core::{Credential, ProviderError, RecordSpec, RecordType, RemoteRecordState, Result, WriteMode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Provider name used in logs
const PROVIDER_NAME: &str = "gandi";

/// Record set as returned by `GET .../records/:name/:type`
#[derive(Debug, Deserialize)]
struct LiveDnsRecord {
    rrset_values: Vec<String>,
    #[serde(default)]
    rrset_ttl: Option<u32>,
    #[serde(default)]
    rrset_name: Option<String>,
    #[serde(default)]
    rrset_type: Option<RecordType>,
}

/// Body of a create or replace request
#[derive(Debug, Serialize)]
struct LiveDnsRecordWrite<'a> {
    rrset_ttl: u32,
    rrset_values: [&'a str; 1],
}

/// Gandi LiveDNS provider
///
/// # Security
///
/// The Debug implementation does NOT expose the API token.
pub struct GandiProvider {
    /// API base URL, without trailing slash
    base_url: String,

    /// Bearer credential
    /// ⚠️ NEVER log this value
    credential: Credential,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for GandiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GandiProvider")
            .field("base_url", &self.base_url)
            .field("credential", &"<REDACTED>")
            .finish()
    }
}

impl GandiProvider {
    /// Create a provider from validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is malformed or the
    /// HTTP client cannot be built (bad extra TLS roots, zero timeout).
    pub fn new(config: &ProviderConfig, transport: &TransportConfig) -> Result<Self> {
        config.validate()?;
        let client = build_http_client(transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a provider around an existing HTTP client
    pub fn with_client(config: &ProviderConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.credential.clone(),
            client,
        }
    }

    /// URL of one record set
    fn record_url(&self, zone: &str, name: &str, record_type: RecordType) -> String {
        format!(
            "{}/domains/{}/records/{}/{}",
            self.base_url,
            zone,
            name,
            record_type.as_str()
        )
    }

    /// Turn a non-success response into a ProviderError
    async fn error_from(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        ProviderError::api(status.as_u16(), body)
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    ProviderError::transport(format!("HTTP request failed: {}", e))
}

#[async_trait]
impl DnsProvider for GandiProvider {
    /// Read one record set
    ///
    /// ```http
    /// GET /domains/example.com/records/www/A
    /// Authorization: Bearer <token>
    /// ```
    async fn read_record(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
    ) -> std::result::Result<Option<RemoteRecordState>, ProviderError> {
        let url = self.record_url(zone, name, record_type);
        tracing::debug!("API Request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.credential.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Record {} ({}) not found in zone {}", name, record_type, zone);
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let text = response.text().await.map_err(transport_error)?;
        let record: LiveDnsRecord = serde_json::from_str(&text)
            .map_err(|e| ProviderError::decode(format!("{}. Response: {}", e, text)))?;
        tracing::debug!("API Response: {:?}", record);

        if let Some(remote_type) = record.rrset_type
            && remote_type != record_type
        {
            return Err(ProviderError::decode(format!(
                "asked for {} record {}, got {} record {}",
                record_type,
                name,
                remote_type,
                record.rrset_name.as_deref().unwrap_or(name)
            )));
        }

        let state = RemoteRecordState::new(record.rrset_values);
        Ok(Some(match record.rrset_ttl {
            Some(ttl) => state.with_ttl(ttl),
            None => state,
        }))
    }

    /// Create or replace one record set with the desired value
    ///
    /// ```http
    /// POST|PUT /domains/example.com/records/www/A
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    ///
    /// {"rrset_ttl": 300, "rrset_values": ["203.0.113.5"]}
    /// ```
    async fn write_record(
        &self,
        spec: &RecordSpec,
        mode: WriteMode,
    ) -> std::result::Result<(), ProviderError> {
        let url = self.record_url(spec.zone(), spec.name(), spec.record_type());
        let payload = LiveDnsRecordWrite {
            rrset_ttl: spec.ttl_seconds(),
            rrset_values: [spec.desired_value()],
        };

        let request = match mode {
            WriteMode::Create => self.client.post(&url),
            WriteMode::Update => self.client.put(&url),
        };

        tracing::debug!(
            "API Request: {} {}",
            if mode == WriteMode::Create { "POST" } else { "PUT" },
            url
        );
        tracing::debug!(
            "API Request Payload: {}",
            serde_json::to_string(&payload).unwrap_or_default()
        );

        let response = request
            .bearer_auth(self.credential.expose())
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("API Response: {}", body);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
