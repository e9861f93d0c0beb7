//! Record reconciliation engine
//!
//! The Reconciler is responsible for:
//! - Expanding the requested record names
//! - Reading each record's current state via DnsProvider
//! - Deciding between no-op, dry-run report, create and update
//! - Stopping the pass at the first failed provider call
//!
//! ## Architecture
//!
//! ```text
//! ReconcileRequest
//!        │
//!        ▼
//! ┌──────────────┐   read_record    ┌──────────────┐
//! │  Reconciler  │ ───────────────▶ │ DnsProvider  │
//! │              │ ◀─────────────── │              │
//! │              │   write_record   │              │
//! │              │ ───────────────▶ │              │
//! └──────────────┘                  └──────────────┘
//!        │
//!        ├──▶ ReconciliationReport (returned)
//!        └──▶ ReconcileEvent (optional observer channel)
//! ```
//!
//! ## Per-record decision
//!
//! 1. Remote set exists and contains the desired value → up to date
//! 2. Dry run → would update (no mutating call)
//! 3. Otherwise → create if absent, update (full replace) if present
//!
//! Names are processed strictly in order, one provider call at a time.
//! Nothing is retried and nothing is cached between names.

mod report;

pub use report::{OutcomeKind, ReconciliationReport, RecordOutcome};

use crate::error::{Error, Result};
use crate::record::{ReconcileRequest, RecordSpec, RecordType, WriteMode};
use crate::traits::DnsProvider;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events emitted by the Reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// A pass started
    PassStarted {
        zone: String,
        record_type: RecordType,
        records_count: usize,
    },

    /// One record was processed
    RecordProcessed {
        zone: String,
        record_type: RecordType,
        outcome: RecordOutcome,
    },

    /// A pass finished (successfully or not)
    PassFinished {
        zone: String,
        record_type: RecordType,
        succeeded: bool,
    },
}

/// Record reconciliation engine
///
/// ## Lifecycle
///
/// 1. Create with [`Reconciler::new()`]
/// 2. Optionally [`Reconciler::subscribe()`] to outcome events
/// 3. Call [`Reconciler::reconcile()`] once per address family
pub struct Reconciler {
    /// DNS provider for reading and writing records
    provider: Box<dyn DnsProvider>,

    /// Event sender for external observers
    event_tx: Option<mpsc::Sender<ReconcileEvent>>,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(provider: Box<dyn DnsProvider>) -> Self {
        Self {
            provider,
            event_tx: None,
        }
    }

    /// Subscribe to reconciliation events
    ///
    /// Replaces any previous subscription. When the channel is full, events
    /// are dropped with a warning.
    pub fn subscribe(&mut self, capacity: usize) -> mpsc::Receiver<ReconcileEvent> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.event_tx = Some(tx);
        rx
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Converge every requested record of one address family
    ///
    /// The returned report lists one outcome per processed name, in input
    /// order. On the first provider failure the failing name is reported as
    /// [`OutcomeKind::Failed`] and the remaining names are not processed.
    pub async fn reconcile(&self, request: &ReconcileRequest, dry_run: bool) -> ReconciliationReport {
        let names = request.expanded_names();
        info!(
            "({}) Total of {} record(s) to check in zone {} [mode: {}]",
            request.record_type,
            names.len(),
            request.zone,
            if dry_run { "DRY-RUN" } else { "LIVE" }
        );

        self.emit_event(ReconcileEvent::PassStarted {
            zone: request.zone.clone(),
            record_type: request.record_type,
            records_count: names.len(),
        });

        let mut report = ReconciliationReport::new(request.zone.clone(), request.record_type);

        for name in names {
            let spec = request.spec_for(&name);

            let outcome = match self.reconcile_record(&spec, dry_run).await {
                Ok(kind) => report.push(RecordOutcome::new(name, kind)),
                Err(e) => {
                    error!("Failed to reconcile record: {}", e);
                    report.fail(name, e)
                }
            };

            self.emit_event(ReconcileEvent::RecordProcessed {
                zone: request.zone.clone(),
                record_type: request.record_type,
                outcome: outcome.clone(),
            });

            if report.error().is_some() {
                warn!(
                    "({}) Aborting pass for zone {}: remaining records not processed",
                    request.record_type, request.zone
                );
                break;
            }
        }

        self.emit_event(ReconcileEvent::PassFinished {
            zone: request.zone.clone(),
            record_type: request.record_type,
            succeeded: report.is_success(),
        });

        report
    }

    /// Decide and apply the outcome for a single record
    async fn reconcile_record(&self, spec: &RecordSpec, dry_run: bool) -> Result<OutcomeKind> {
        let record_type = spec.record_type();
        debug!("({}) Testing record: {}.{}", record_type, spec.name(), spec.zone());

        let current = self
            .provider
            .read_record(spec.zone(), spec.name(), record_type)
            .await
            .map_err(|e| Error::record(spec.zone(), spec.name(), record_type, e))?;

        if let Some(ref state) = current
            && state.contains(spec.desired_value())
        {
            info!(
                "({}) Record: {}.{} is already up to date ({}).",
                record_type,
                spec.name(),
                spec.zone(),
                spec.desired_value()
            );
            return Ok(OutcomeKind::UpToDate);
        }

        let mode = WriteMode::for_existing(current.is_some());

        if dry_run {
            info!(
                "[DRY-RUN] Would {} {} record {}.{} -> {} (was: {:?})",
                mode,
                record_type,
                spec.name(),
                spec.zone(),
                spec.desired_value(),
                current.as_ref().map(|s| &s.values)
            );
            return Ok(OutcomeKind::WouldUpdate { mode });
        }

        self.provider
            .write_record(spec, mode)
            .await
            .map_err(|e| Error::record(spec.zone(), spec.name(), record_type, e))?;

        info!(
            "Record {} for {}.{} is set to {} ({}).",
            record_type,
            spec.name(),
            spec.zone(),
            spec.desired_value(),
            mode
        );
        Ok(OutcomeKind::Updated { mode })
    }

    /// Emit a reconcile event
    fn emit_event(&self, event: ReconcileEvent) {
        let Some(ref tx) = self.event_tx else {
            return;
        };

        match tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Event channel full, dropping event. Consider increasing the subscription capacity.");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("Event receiver dropped, event discarded");
            }
        }
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("provider", &self.provider.provider_name())
            .field("subscribed", &self.event_tx.is_some())
            .finish()
    }
}
