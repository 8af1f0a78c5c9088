use crate::content::ContentRecord;
use crate::threshold::DeletionThreshold;

/// Eligibility rule shared by media, slides and channels.
///
/// A record is eligible when it is orphaned, or when a threshold is set and
/// the record was last modified strictly before it. The clauses are OR-ed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    threshold: Option<DeletionThreshold>,
}

impl RetentionPolicy {
    pub fn new(threshold: Option<DeletionThreshold>) -> Self {
        Self { threshold }
    }

    pub fn orphans_only() -> Self {
        Self { threshold: None }
    }

    pub fn threshold(&self) -> Option<DeletionThreshold> {
        self.threshold
    }

    pub fn is_stale(&self, record: &ContentRecord) -> bool {
        self.threshold
            .map(|t| t.is_before(record.updated_at))
            .unwrap_or(false)
    }

    pub fn is_eligible(&self, record: &ContentRecord) -> bool {
        record.is_orphaned() || self.is_stale(record)
    }
}
