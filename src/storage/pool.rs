//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled so lookups can read while a load commits
//! - Busy and acquire timeouts so a stuck store call fails instead of hanging
//! - Automatic database file (and parent directory) creation

use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::error_handling::DatabaseError;

/// Shared handle to the SQLite pool.
pub type DbPool = Arc<Pool<Sqlite>>;

/// Initializes and returns a database connection pool for `config.db_path`.
///
/// Creates the database file if it doesn't exist and enables WAL mode
/// for concurrent readers.
pub async fn init_db_pool(config: &Config) -> Result<DbPool, DatabaseError> {
    init_db_pool_with_path(&config.db_path, config).await
}

/// Initializes and returns a database connection pool with an explicit path.
///
/// Timeouts and pool size still come from `config`.
pub async fn init_db_pool_with_path(
    db_path: &Path,
    config: &Config,
) -> Result<DbPool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create database directory {}: {e}", parent.display());
            DatabaseError::FileCreationError(e.to_string())
        })?;
    }

    let existed = db_path.exists();
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.store_busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.store_max_connections)
        .acquire_timeout(config.store_acquire_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    if existed {
        info!("Opened existing database {}", db_path.display());
    } else {
        info!("Created database {}", db_path.display());
    }

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_db_pool_creates_file_and_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("nested").join("geolite2.db");
        let config = Config {
            db_path: db_path.clone(),
            ..Default::default()
        };

        let pool = init_db_pool(&config).await.expect("pool should open");
        assert!(db_path.exists());

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_init_db_pool_reopens_existing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("geolite2.db");
        let config = Config::default();

        {
            let pool = init_db_pool_with_path(&db_path, &config).await.unwrap();
            sqlx::query("CREATE TABLE marker (id INTEGER)")
                .execute(pool.as_ref())
                .await
                .unwrap();
            pool.close().await;
        }

        let pool = init_db_pool_with_path(&db_path, &config).await.unwrap();
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE name='marker'")
                .fetch_one(pool.as_ref())
                .await
                .unwrap();
        assert_eq!(count, 1);
    }
}
