//! Load history.
//!
//! Each committed dataset file leaves one row in `geolite2_load_history`,
//! written in the same transaction as the data itself.

use serde::Serialize;
use sqlx::{Pool, Row, Sqlite, SqliteConnection};

use crate::error_handling::DatabaseError;

const HISTORY_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS geolite2_load_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dataset TEXT NOT NULL,
    relation TEXT NOT NULL,
    source_path TEXT NOT NULL,
    row_count INTEGER NOT NULL,
    loaded_at_ms INTEGER NOT NULL
)";

/// One committed dataset load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRecord {
    pub dataset: String,
    pub relation: String,
    pub source_path: String,
    pub row_count: i64,
    pub loaded_at_ms: i64,
}

/// Declares the history table if absent.
pub async fn ensure_history(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    sqlx::query(HISTORY_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(())
}

/// Records a load on the caller's transaction connection.
pub(crate) async fn insert_load_record(
    conn: &mut SqliteConnection,
    record: &LoadRecord,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO geolite2_load_history (dataset, relation, source_path, row_count, loaded_at_ms)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.dataset)
    .bind(&record.relation)
    .bind(&record.source_path)
    .bind(record.row_count)
    .bind(record.loaded_at_ms)
    .execute(conn)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}

/// Query load history, most recent first.
///
/// # Example
///
/// ```no_run
/// use geolite2_store::{init_db_pool, query_load_history, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = init_db_pool(&Config::default()).await?;
/// for record in query_load_history(&pool, Some(10)).await? {
///     println!("{}: {} rows into {}", record.dataset, record.row_count, record.relation);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn query_load_history(
    pool: &Pool<Sqlite>,
    limit: Option<usize>,
) -> Result<Vec<LoadRecord>, DatabaseError> {
    ensure_history(pool).await?;

    let query = match limit {
        Some(limit) => format!(
            "SELECT dataset, relation, source_path, row_count, loaded_at_ms
             FROM geolite2_load_history
             ORDER BY loaded_at_ms DESC, id DESC
             LIMIT {}",
            limit
        ),
        None => "SELECT dataset, relation, source_path, row_count, loaded_at_ms
                 FROM geolite2_load_history
                 ORDER BY loaded_at_ms DESC, id DESC"
            .to_string(),
    };

    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    Ok(rows
        .iter()
        .map(|row| LoadRecord {
            dataset: row.get("dataset"),
            relation: row.get("relation"),
            source_path: row.get("source_path"),
            row_count: row.get("row_count"),
            loaded_at_ms: row.get("loaded_at_ms"),
        })
        .collect())
}
