use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use signage_application::ports::ContentRepository;
use signage_domain::{ContentKind, ContentRecord, DomainError};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

/// Millisecond precision matches what SQLite's `julianday()` keeps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

type ContentRow = (i64, Option<String>, String, i64);

/// Where a content kind lives and which table places it into a layout
struct ContentTable {
    table: &'static str,
    association_table: &'static str,
    foreign_key: &'static str,
}

fn table_for(kind: ContentKind) -> ContentTable {
    match kind {
        ContentKind::Media => ContentTable {
            table: "media",
            association_table: "media_orders",
            foreign_key: "media_id",
        },
        ContentKind::Slide => ContentTable {
            table: "slides",
            association_table: "channel_slide_orders",
            foreign_key: "slide_id",
        },
        ContentKind::Channel => ContentTable {
            table: "channels",
            association_table: "channel_screen_regions",
            foreign_key: "channel_id",
        },
    }
}

impl ContentTable {
    fn select(&self, condition: &str) -> String {
        format!(
            "SELECT c.id, c.title, c.updated_at,
                    (SELECT COUNT(*) FROM {assoc} a WHERE a.{fk} = c.id) AS association_count
             FROM {table} c
             WHERE {condition}
             ORDER BY c.id",
            assoc = self.association_table,
            fk = self.foreign_key,
            table = self.table,
            condition = condition,
        )
    }

    fn orphaned_condition(&self) -> String {
        format!(
            "NOT EXISTS (SELECT 1 FROM {} a WHERE a.{} = c.id)",
            self.association_table, self.foreign_key
        )
    }
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Reads every layout `julianday()` understands for stored rows: space or
/// `T` separated, optional fraction, optional UTC offset.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|dt| dt.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .ok()
        .map(|dt| dt.round_subsecs(3))
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!(error = %e, "{}", context);
        DomainError::Persistence(e.to_string())
    }
}

/// SQLite gateway over the media, slide and channel tables.
///
/// `remove` only records the target; `commit` deletes everything recorded in
/// a single transaction. Association rows go with their owner through
/// `ON DELETE CASCADE`.
pub struct SqliteContentRepository {
    pool: SqlitePool,
    staged: Mutex<Vec<(ContentKind, i64)>>,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn row_to_record(kind: ContentKind, row: ContentRow) -> Result<ContentRecord, DomainError> {
        let (id, title, updated_at, association_count) = row;

        let updated_at = parse_timestamp(&updated_at).ok_or_else(|| {
            DomainError::Persistence(format!(
                "{} {} has unreadable updated_at '{}'",
                kind, id, updated_at
            ))
        })?;

        Ok(ContentRecord {
            id,
            kind,
            title: title.map(|s| Arc::from(s.as_str())),
            updated_at,
            association_count: association_count.max(0) as u64,
        })
    }

    fn rows_to_records(
        kind: ContentKind,
        rows: Vec<ContentRow>,
    ) -> Result<Vec<ContentRecord>, DomainError> {
        rows.into_iter()
            .map(|row| Self::row_to_record(kind, row))
            .collect()
    }
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    #[instrument(skip(self))]
    async fn find_orphaned(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, DomainError> {
        let table = table_for(kind);
        let sql = table.select(&table.orphaned_condition());

        let rows = sqlx::query_as::<_, ContentRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query orphaned content"))?;

        Self::rows_to_records(kind, rows)
    }

    #[instrument(skip(self))]
    async fn find_modified_before(
        &self,
        kind: ContentKind,
        before: DateTime<Utc>,
    ) -> Result<Vec<ContentRecord>, DomainError> {
        // Compare instants, not text: rows may use a `T` separator or an offset
        let sql = table_for(kind).select("julianday(c.updated_at) < julianday(?)");

        let rows = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(format_timestamp(before))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query stale content"))?;

        Self::rows_to_records(kind, rows)
    }

    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        kind: ContentKind,
        id: i64,
    ) -> Result<Option<ContentRecord>, DomainError> {
        let sql = table_for(kind).select("c.id = ?");

        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to query content by id"))?;

        row.map(|r| Self::row_to_record(kind, r)).transpose()
    }

    #[instrument(skip(self))]
    async fn count(&self, kind: ContentKind) -> Result<u64, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table_for(kind).table);

        let (count,): (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count content"))?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, record), fields(kind = %record.kind, id = record.id))]
    async fn remove(&self, record: &ContentRecord) -> Result<(), DomainError> {
        self.staged.lock().await.push((record.kind, record.id));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn commit(&self) -> Result<u64, DomainError> {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        if staged.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin cleanup transaction"))?;

        let mut deleted = 0;
        for (kind, id) in &staged {
            let sql = format!("DELETE FROM {} WHERE id = ?", table_for(*kind).table);
            let result = sqlx::query(&sql)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to delete content"))?;
            deleted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit cleanup transaction"))?;

        debug!(staged = staged.len(), deleted, "Removals committed");
        Ok(deleted)
    }

    async fn rollback(&self) {
        self.staged.lock().await.clear();
    }
}
