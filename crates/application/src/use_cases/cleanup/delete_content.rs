use crate::ports::ContentRepository;
use signage_domain::{ContentRecord, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

/// Removes a single record and commits before returning.
pub struct DeleteContentUseCase {
    content_repo: Arc<dyn ContentRepository>,
}

impl DeleteContentUseCase {
    pub fn new(content_repo: Arc<dyn ContentRepository>) -> Self {
        Self { content_repo }
    }

    #[instrument(skip(self, record), fields(kind = %record.kind, id = record.id))]
    pub async fn execute(&self, record: &ContentRecord) -> Result<(), DomainError> {
        self.content_repo.remove(record).await?;

        let deleted = self.content_repo.commit().await?;
        if deleted == 0 {
            return Err(DomainError::ContentNotFound {
                kind: record.kind,
                id: record.id,
            });
        }

        info!("Content deleted");
        Ok(())
    }
}
