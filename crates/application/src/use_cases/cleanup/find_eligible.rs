use crate::ports::ContentRepository;
use signage_domain::{ContentKind, ContentRecord, DeletionThreshold, DomainError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Selects the records of one content type that may be deleted.
///
/// Orphaned records and (with a threshold) stale records are fetched with two
/// independent queries and unioned by id, so a record needs to match only one
/// of them. Output is ordered by id.
pub struct FindEligibleContentUseCase {
    content_repo: Arc<dyn ContentRepository>,
}

impl FindEligibleContentUseCase {
    pub fn new(content_repo: Arc<dyn ContentRepository>) -> Self {
        Self { content_repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        kind: ContentKind,
        threshold: Option<DeletionThreshold>,
    ) -> Result<Vec<ContentRecord>, DomainError> {
        let orphaned = self.content_repo.find_orphaned(kind).await?;
        let orphan_count = orphaned.len();

        let mut eligible: BTreeMap<i64, ContentRecord> =
            orphaned.into_iter().map(|r| (r.id, r)).collect();

        if let Some(threshold) = threshold {
            let stale = self
                .content_repo
                .find_modified_before(kind, threshold.instant())
                .await?;
            for record in stale {
                eligible.entry(record.id).or_insert(record);
            }
        }

        debug!(
            orphaned = orphan_count,
            eligible = eligible.len(),
            "Eligible content evaluated"
        );

        Ok(eligible.into_values().collect())
    }
}
