use signage_domain::{ContentKind, DeletionThreshold, DomainError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum BatchStatus {
    /// Candidates were found but execution did not run (dry run or declined)
    Discovered,
    /// Execution ran and its removals are durable
    Committed,
    /// Execution failed; `deleted` counts what was durable before the error
    Failed(DomainError),
    /// An earlier batch failed, so this one was never executed
    NotExecuted,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub kind: ContentKind,
    /// Records of this kind in the store when discovery ran
    pub stored: u64,
    pub found: u64,
    pub deleted: u64,
    pub status: BatchStatus,
}

impl BatchOutcome {
    pub fn discovered(kind: ContentKind, stored: u64, found: u64) -> Self {
        Self {
            kind,
            stored,
            found,
            deleted: 0,
            status: BatchStatus::Discovered,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.found.saturating_sub(self.deleted)
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, BatchStatus::Failed(_))
    }

    pub fn remaining(&self) -> u64 {
        self.stored.saturating_sub(self.deleted)
    }
}

/// Outcome of one cleanup run
#[derive(Debug, Clone)]
pub struct CleanupReport {
    pub threshold: Option<DeletionThreshold>,
    pub dry_run: bool,
    pub confirmed: bool,
    pub batches: Vec<BatchOutcome>,
}

impl CleanupReport {
    pub fn total_found(&self) -> u64 {
        self.batches.iter().map(|b| b.found).sum()
    }

    pub fn total_deleted(&self) -> u64 {
        self.batches.iter().map(|b| b.deleted).sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.batches.iter().map(BatchOutcome::skipped).sum()
    }

    pub fn failed(&self) -> bool {
        self.batches.iter().any(BatchOutcome::failed)
    }

    pub fn batch(&self, kind: ContentKind) -> Option<&BatchOutcome> {
        self.batches.iter().find(|b| b.kind == kind)
    }

    pub fn deleted(&self, kind: ContentKind) -> u64 {
        self.batch(kind).map(|b| b.deleted).unwrap_or(0)
    }

    fn outcome_line(&self) -> &'static str {
        if self.total_found() == 0 {
            "Nothing to delete, no changes made."
        } else if self.dry_run {
            "Dry run, no changes made."
        } else if !self.confirmed {
            "Cleanup declined, no changes made."
        } else if self.failed() {
            "Cleanup stopped after a persistence error."
        } else {
            "Cleanup done."
        }
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.threshold {
            Some(threshold) => writeln!(f, "Threshold: {}", threshold)?,
            None => writeln!(f, "Threshold: none (orphaned content only)")?,
        }

        for batch in &self.batches {
            let state = match &batch.status {
                BatchStatus::Discovered => "not executed".to_string(),
                BatchStatus::Committed => "committed".to_string(),
                BatchStatus::Failed(e) => format!("FAILED: {}", e),
                BatchStatus::NotExecuted => "aborted".to_string(),
            };
            writeln!(
                f,
                "  {:<8} found {:>5} of {:>5}, deleted {:>5}, skipped {:>5}, remaining {:>5} ({})",
                batch.kind.plural(),
                batch.found,
                batch.stored,
                batch.deleted,
                batch.skipped(),
                batch.remaining(),
                state
            )?;
        }

        writeln!(f, "{}", self.outcome_line())?;
        write!(
            f,
            "Deleted {} of {} records, skipped {}.",
            self.total_deleted(),
            self.total_found(),
            self.total_skipped()
        )
    }
}
