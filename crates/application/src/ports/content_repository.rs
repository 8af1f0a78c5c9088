use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signage_domain::{ContentKind, ContentRecord, DomainError};

/// Persistence gateway for retention cleanup.
///
/// Removals are staged by `remove` and only become durable on `commit`;
/// `rollback` drops whatever is staged.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Records of `kind` without any ordering or placement association
    async fn find_orphaned(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, DomainError>;

    /// Records of `kind` last modified strictly before `before`
    async fn find_modified_before(
        &self,
        kind: ContentKind,
        before: DateTime<Utc>,
    ) -> Result<Vec<ContentRecord>, DomainError>;

    async fn get_by_id(
        &self,
        kind: ContentKind,
        id: i64,
    ) -> Result<Option<ContentRecord>, DomainError>;

    async fn count(&self, kind: ContentKind) -> Result<u64, DomainError>;

    async fn remove(&self, record: &ContentRecord) -> Result<(), DomainError>;

    /// Apply every staged removal atomically, returning the rows deleted
    async fn commit(&self) -> Result<u64, DomainError>;

    async fn rollback(&self);
}
