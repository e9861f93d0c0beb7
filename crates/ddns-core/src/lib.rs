// # ddns-core
//
// Core library for the DDNS record reconciliation system.
//
// ## Architecture Overview
//
// This library provides the core functionality for pointing DNS records at
// the current public IP:
// - **IpSource**: Trait for discovering the current public address
// - **DnsProvider**: Trait for reading and writing records via provider APIs
// - **Reconciler**: Decides per record between no-op, create and update
// - **Runner**: Executes the IPv4 and IPv6 passes of one invocation
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Stateless**: Every run re-reads remote state; nothing is persisted
// 3. **Sequential**: One provider call in flight at a time
// 4. **Library-First**: All core functionality can be used as a library
// 5. **Dry-Run Safety**: Dry runs issue zero mutating calls

pub mod traits;
pub mod reconciler;
pub mod runner;
pub mod record;
pub mod config;
pub mod credential;
pub mod error;
pub mod transport;
pub mod validate;

// Re-export core types for convenience
pub use traits::{IpSource, IpVersion, DnsProvider};
pub use reconciler::{OutcomeKind, ReconcileEvent, Reconciler, ReconciliationReport, RecordOutcome};
pub use runner::{PassOutcome, PassSummary, RunSummary, Runner};
pub use record::{
    expand_record_names, ReconcileRequest, RecordSpec, RecordType, RemoteRecordState, WriteMode,
};
pub use config::{IpSourceConfig, ProviderConfig, RunConfig, TransportConfig};
pub use credential::Credential;
pub use error::{Error, ProviderError, Result};
