use signage_domain::DatabaseConfig;
use signage_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = cfg.url();
    info!("Initializing database: {}", database_url);

    let pool = create_pool(&database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize database pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Database initialized successfully (max_connections={})",
        cfg.max_connections
    );

    Ok(pool)
}
