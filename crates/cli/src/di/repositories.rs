use signage_infrastructure::repositories::SqliteContentRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub content: Arc<SqliteContentRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            content: Arc::new(SqliteContentRepository::new(pool)),
        }
    }
}
