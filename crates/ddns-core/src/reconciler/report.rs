//! Per-pass reconciliation results

use crate::error::Error;
use crate::record::{RecordType, WriteMode};

/// What happened to one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The remote set already contained the desired value
    UpToDate,
    /// Dry run: this write would have been issued
    WouldUpdate { mode: WriteMode },
    /// The write was issued and accepted
    Updated { mode: WriteMode },
    /// A provider call failed; the pass stopped here
    Failed { error: String },
}

/// Outcome for one record name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub name: String,
    pub kind: OutcomeKind,
}

impl RecordOutcome {
    pub fn new(name: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered outcomes of one pass (one zone, one record type)
#[derive(Debug)]
pub struct ReconciliationReport {
    zone: String,
    record_type: RecordType,
    outcomes: Vec<RecordOutcome>,
    error: Option<Error>,
}

impl ReconciliationReport {
    pub(crate) fn new(zone: String, record_type: RecordType) -> Self {
        Self {
            zone,
            record_type,
            outcomes: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn push(&mut self, outcome: RecordOutcome) -> &RecordOutcome {
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    pub(crate) fn fail(&mut self, name: String, error: Error) -> &RecordOutcome {
        let kind = OutcomeKind::Failed {
            error: error.to_string(),
        };
        self.error = Some(error);
        self.push(RecordOutcome::new(name, kind))
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Outcomes in processing order
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    /// The failure that stopped the pass, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Whether every processed record converged (or would converge)
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of mutating calls that were issued and accepted
    pub fn writes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Updated { .. }))
            .count()
    }

    /// Consume the report, surfacing the failure as an error
    pub fn into_result(self) -> Result<Vec<RecordOutcome>, Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.outcomes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    #[test]
    fn test_failure_is_kept_in_order() {
        let mut report = ReconciliationReport::new("example.com".into(), RecordType::A);
        report.push(RecordOutcome::new("www", OutcomeKind::UpToDate));
        report.push(RecordOutcome::new(
            "blog",
            OutcomeKind::Updated {
                mode: WriteMode::Update,
            },
        ));
        report.fail(
            "mail".into(),
            Error::record("example.com", "mail", RecordType::A, ProviderError::api(500, "")),
        );

        assert!(!report.is_success());
        assert_eq!(report.writes(), 1);
        assert_eq!(report.outcomes()[2].name, "mail");
        assert!(matches!(report.outcomes()[2].kind, OutcomeKind::Failed { .. }));
        assert!(report.into_result().is_err());
    }
}
