use anyhow::Context;
use axum::http::StatusCode;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

pub mod config;
pub mod controllers;
pub mod error;
pub mod feed;
pub mod logging;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use error::ApiError;
pub use feed::Feed;
pub use store::{MessageStore, SetOutcome};

/// Default database file when DATABASE_URL is not set.
pub const DEFAULT_DATABASE_FILE: &str = "friendlychat.db";

pub struct AppState {
    pub pool: SqlitePool,
    pub store: MessageStore,
    /// Websocket sessions subscribed to the message feed.
    pub feed: Feed,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: MessageStore::new(pool.clone()),
            pool,
            feed: Feed::default(),
        }
    }
}

// Given a file path, returns a valid SQLite URL. Creates parent directories and the file if missing.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:///{}", s))
}

/// Builds the SQLite URL from DATABASE_URL, falling back to `friendlychat.db`
/// in the current directory.
pub fn build_sqlite_url() -> anyhow::Result<String> {
    let raw = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_FILE.to_string());
    sqlite_url_from_raw(&raw)
}

fn sqlite_url_from_raw(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // "sqlite:///abs/path" keeps its leading slash, "sqlite://rel/path" stays relative
    let path_part = raw.strip_prefix("sqlite://").unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Creates the messages table if it does not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            message_id TEXT PRIMARY KEY,
            text       TEXT,
            name       TEXT NOT NULL DEFAULT '',
            photo_url  TEXT,
            image_url  TEXT
        );"#,
    ];
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}

/// Checks database health by acquiring a connection from the pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
