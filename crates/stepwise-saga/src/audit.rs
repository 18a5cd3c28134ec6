use std::time::Instant;

/// Status of a forward step in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Method ran successfully and was not rolled back.
    Executed,
    /// Method failed; this is the step that triggered rollback.
    Failed,
    /// Method was undone by its compensating method.
    Compensated,
    /// The compensating method failed.
    CompensationFailed,
    /// No compensating method exists, so the step was left applied.
    NotReversible,
}

/// Record of one forward step of a migration.
#[derive(Debug)]
pub struct StepRecord {
    /// Name of the method.
    pub name: String,
    pub status: StepStatus,
    /// When the method started executing.
    pub started_at: Instant,
    /// When the last invocation touching this step completed.
    pub completed_at: Option<Instant>,
    /// Method invoked to undo this step, if rollback reached it.
    pub compensated_by: Option<String>,
}

/// Audit log of all forward steps in a migration.
///
/// Records are kept by position, so the same method listed twice gets two
/// independent records.
#[derive(Debug, Default)]
pub struct MigrationAuditLog {
    records: Vec<StepRecord>,
}

impl MigrationAuditLog {
    /// Create a new empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
            compensated_by: None,
        });
    }

    pub(crate) fn record_success(&mut self) {
        if let Some(record) = self.records.last_mut() {
            record.status = StepStatus::Executed;
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn record_failure(&mut self) {
        if let Some(record) = self.records.last_mut() {
            record.status = StepStatus::Failed;
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn record_compensated(&mut self, index: usize, compensating: &str) {
        self.update(index, StepStatus::Compensated, Some(compensating));
    }

    pub(crate) fn record_compensation_failed(&mut self, index: usize, compensating: &str) {
        self.update(index, StepStatus::CompensationFailed, Some(compensating));
    }

    pub(crate) fn record_not_reversible(&mut self, index: usize) {
        self.update(index, StepStatus::NotReversible, None);
    }

    fn update(&mut self, index: usize, status: StepStatus, compensating: Option<&str>) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = status;
            record.completed_at = Some(Instant::now());
            record.compensated_by = compensating.map(str::to_string);
        }
    }

    /// All records, in forward order.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// One line per step, prefixed by a status marker.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Compensated => "↩",
                StepStatus::CompensationFailed => "⚠",
                StepStatus::NotReversible => "·",
            };
            match &record.compensated_by {
                Some(compensating) => lines.push(format!("{status} {} ({compensating})", record.name)),
                None => lines.push(format!("{status} {}", record.name)),
            }
        }
        lines.join("\n")
    }
}
