#![allow(dead_code)]

use async_trait::async_trait;
use signage_application::ports::OperatorConsole;
use signage_domain::{DatabaseConfig, DomainError};
use signage_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::Mutex;

pub async fn create_test_db() -> SqlitePool {
    let cfg = DatabaseConfig {
        path: "sqlite::memory:".to_string(),
        max_connections: 1,
        busy_timeout_secs: 1,
    };
    create_pool(&cfg.url(), &cfg).await.unwrap()
}

async fn insert_content(pool: &SqlitePool, table: &str, title: &str, updated_at: &str) -> i64 {
    let sql = format!(
        "INSERT INTO {} (title, updated_at) VALUES (?, ?) RETURNING id",
        table
    );
    let (id,): (i64,) = sqlx::query_as(&sql)
        .bind(title)
        .bind(updated_at)
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_media(pool: &SqlitePool, title: &str, updated_at: &str) -> i64 {
    insert_content(pool, "media", title, updated_at).await
}

pub async fn insert_slide(pool: &SqlitePool, title: &str, updated_at: &str) -> i64 {
    insert_content(pool, "slides", title, updated_at).await
}

pub async fn insert_channel(pool: &SqlitePool, title: &str, updated_at: &str) -> i64 {
    insert_content(pool, "channels", title, updated_at).await
}

pub async fn order_media(pool: &SqlitePool, media_id: i64, slide_id: i64) {
    sqlx::query("INSERT INTO media_orders (media_id, slide_id, sort_order) VALUES (?, ?, 0)")
        .bind(media_id)
        .bind(slide_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn order_slide(pool: &SqlitePool, channel_id: i64, slide_id: i64) {
    sqlx::query(
        "INSERT INTO channel_slide_orders (channel_id, slide_id, sort_order) VALUES (?, ?, 0)",
    )
    .bind(channel_id)
    .bind(slide_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn place_channel(pool: &SqlitePool, channel_id: i64, screen_id: i64) {
    sqlx::query("INSERT INTO channel_screen_regions (channel_id, screen_id, region) VALUES (?, ?, 1)")
        .bind(channel_id)
        .bind(screen_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn row_count(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

/// Operator stand-in that replays fixed answers
pub struct ScriptedConsole {
    confirms: Mutex<VecDeque<bool>>,
    answers: Mutex<VecDeque<String>>,
    lines: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new(confirms: Vec<bool>, answers: Vec<&str>) -> Self {
        Self {
            confirms: Mutex::new(confirms.into()),
            answers: Mutex::new(answers.into_iter().map(String::from).collect()),
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl OperatorConsole for ScriptedConsole {
    async fn confirm(&self, _prompt: &str, default: bool) -> Result<bool, DomainError> {
        Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(default))
    }

    async fn ask(&self, _prompt: &str, default: &str) -> Result<String, DomainError> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }

    fn say(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
