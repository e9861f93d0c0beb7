//! One-shot run across address families
//!
//! For each enabled family (IPv4 first, then IPv6) the runner discovers the
//! public address and hands a [`ReconcileRequest`] to the [`Reconciler`].
//!
//! Passes are independent: a failed IPv4 pass (discovery or provider) does
//! not prevent the IPv6 pass. The run as a whole fails if any pass failed.

use crate::config::RunConfig;
use crate::error::Error;
use crate::reconciler::{ReconciliationReport, Reconciler};
use crate::record::ReconcileRequest;
use crate::traits::{IpSource, IpVersion};
use tracing::{error, info, warn};

/// How a single address-family pass ended
#[derive(Debug)]
pub enum PassOutcome {
    /// The public address could not be determined; nothing was reconciled
    DiscoveryFailed(Error),
    /// Reconciliation ran (possibly stopping at a provider failure)
    Reconciled(ReconciliationReport),
}

/// Result of one address-family pass
#[derive(Debug)]
pub struct PassSummary {
    pub version: IpVersion,
    pub outcome: PassOutcome,
}

impl PassSummary {
    pub fn is_success(&self) -> bool {
        match self.outcome {
            PassOutcome::Reconciled(ref report) => report.is_success(),
            PassOutcome::DiscoveryFailed(_) => false,
        }
    }

    /// The reconciliation report, if discovery succeeded
    pub fn report(&self) -> Option<&ReconciliationReport> {
        match self.outcome {
            PassOutcome::Reconciled(ref report) => Some(report),
            PassOutcome::DiscoveryFailed(_) => None,
        }
    }

    /// The error that failed this pass, if any
    pub fn error(&self) -> Option<&Error> {
        match self.outcome {
            PassOutcome::Reconciled(ref report) => report.error(),
            PassOutcome::DiscoveryFailed(ref e) => Some(e),
        }
    }
}

/// Result of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub passes: Vec<PassSummary>,
}

impl RunSummary {
    /// Whether every executed pass succeeded
    pub fn is_success(&self) -> bool {
        self.passes.iter().all(PassSummary::is_success)
    }

    /// Summary of the pass for `version`, if it ran
    pub fn pass(&self, version: IpVersion) -> Option<&PassSummary> {
        self.passes.iter().find(|p| p.version == version)
    }

    /// Failures of every pass, in pass order
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.passes.iter().filter_map(PassSummary::error)
    }
}

/// Drives reconciliation for every enabled address family
pub struct Runner {
    reconciler: Reconciler,
    ip_sources: Vec<Box<dyn IpSource>>,
}

impl Runner {
    /// Create a runner with no IP sources
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler,
            ip_sources: Vec::new(),
        }
    }

    /// Register the IP source for its family (replacing any previous one)
    pub fn with_ip_source(mut self, source: Box<dyn IpSource>) -> Self {
        self.ip_sources.retain(|s| s.version() != source.version());
        self.ip_sources.push(source);
        self
    }

    /// Execute every enabled pass, in order
    pub async fn run(&self, config: &RunConfig) -> RunSummary {
        let versions = config.enabled_versions();
        if versions.is_empty() {
            warn!("Both IPv4 and IPv6 passes are disabled, nothing to do");
        }

        let mut summary = RunSummary::default();

        for version in versions {
            let outcome = self.run_pass(version, config).await;
            let pass = PassSummary { version, outcome };

            if let Some(e) = pass.error() {
                error!("{} pass failed: {}", version, e);
            }
            summary.passes.push(pass);
        }

        summary
    }

    async fn run_pass(&self, version: IpVersion, config: &RunConfig) -> PassOutcome {
        let Some(source) = self.ip_sources.iter().find(|s| s.version() == version) else {
            return PassOutcome::DiscoveryFailed(Error::config(format!(
                "No IP source configured for {}",
                version
            )));
        };

        let ip = match source.current().await {
            Ok(ip) => ip,
            Err(e) => return PassOutcome::DiscoveryFailed(e),
        };

        if !version.matches(&ip) {
            return PassOutcome::DiscoveryFailed(Error::discovery(format!(
                "Expected {} address, got: {}",
                version, ip
            )));
        }

        info!("Current {} address is: {}", version, ip);

        let request = ReconcileRequest::new(
            config.zone.clone(),
            config.records.clone(),
            ip,
            config.ttl_secs,
        );

        PassOutcome::Reconciled(self.reconciler.reconcile(&request, config.dry_run).await)
    }
}
