//! SQLite connection pool wrapper for the storage crate.

use std::path::Path;

use log::info;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Manages a single SQLite pool; creates the DB file (and its directory) if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database path. A leading `file:` or `sqlite:` prefix is accepted.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let path = database_url
            .trim_start_matches("sqlite:")
            .trim_start_matches("file:");
        info!("Initializing SQLite pool: {}", path);

        if let Some(dir) = Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(path);

        let pool = SqlitePool::connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
