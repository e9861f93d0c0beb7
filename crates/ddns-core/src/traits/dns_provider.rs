// # DNS Provider Trait
//
// Defines the interface the reconciler uses to read and write DNS records
// through a provider's API.
//
// ## Implementations
//
// - Gandi LiveDNS: `ddns-provider-gandi` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, RecordType, WriteMode};
//
// async fn point_www(provider: &dyn DnsProvider, spec: &ddns_core::RecordSpec) -> anyhow::Result<()> {
//     let current = provider.read_record("example.com", "www", RecordType::A).await?;
//     let mode = WriteMode::for_existing(current.is_some());
//     provider.write_record(spec, mode).await?;
//     Ok(())
// }
// ```

use crate::error::ProviderError;
use crate::record::{RecordSpec, RecordType, RemoteRecordState, WriteMode};
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// A provider is a thin typed wrapper over the provider's REST surface.
///
/// ## Allowed
/// - ✅ One HTTP call per method invocation
/// - ✅ Parse provider-specific responses into [`RemoteRecordState`]
///
/// ## Forbidden
/// - ❌ Retry, backoff or credential refresh
/// - ❌ Caching remote state between calls
/// - ❌ Deciding whether a write is needed (owned by `Reconciler`)
/// - ❌ Logging the API credential
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Read the current record set for (zone, name, type)
    ///
    /// # Returns
    ///
    /// - `Ok(Some(state))`: the record set exists
    /// - `Ok(None)`: the provider reported "not found"; this is a normal
    ///   outcome, not an error
    /// - `Err(ProviderError)`: any other failure
    async fn read_record(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RemoteRecordState>, ProviderError>;

    /// Write `spec` as a single-value record set
    ///
    /// [`WriteMode::Create`] creates the record set, [`WriteMode::Update`]
    /// replaces every existing value with the desired one.
    async fn write_record(&self, spec: &RecordSpec, mode: WriteMode)
        -> Result<(), ProviderError>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
