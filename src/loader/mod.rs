//! Load pipeline.
//!
//! Streams a GeoLite2 CSV file into its relation. Each dataset file is loaded
//! inside exactly one write transaction: either every row commits together
//! with its load-history record, or nothing does.

mod row;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;
use sqlx::{Sqlite, Transaction};

use crate::config::LOAD_PROGRESS_INTERVAL;
use crate::error_handling::GeoError;
use crate::fetch::RemoteFetcher;
use crate::geolite2::{Dataset, DatasetKind};
use crate::storage::history::{ensure_history, insert_load_record, LoadRecord};
use crate::storage::schema::{drop_all_relations, ensure_relation};
use crate::storage::DbPool;

use row::{convert_record, SqlValue};

/// Outcome of one committed dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub dataset: String,
    pub relation: &'static str,
    pub rows: u64,
    pub source: PathBuf,
}

/// Loads GeoLite2 CSV datasets into the store.
///
/// Callers must not run two loads of the same dataset concurrently: the
/// transaction keeps half-loaded data invisible but does not serialize
/// schema creation.
#[derive(Clone)]
pub struct Loader {
    pool: DbPool,
}

impl Loader {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Drops every GeoLite2 relation so the next load starts fresh.
    pub async fn reset(&self) -> Result<(), GeoError> {
        info!("Dropping existing GeoLite2 relations for a fresh load");
        drop_all_relations(&self.pool).await?;
        Ok(())
    }

    /// Loads ASN, City and Country editions from their extracted directories.
    ///
    /// Stops at the first failing dataset. Files committed before the
    /// failure (including earlier locales) stay committed.
    pub async fn load_local(
        &self,
        asn_dir: &Path,
        city_dir: &Path,
        country_dir: &Path,
    ) -> Result<Vec<LoadReport>, GeoError> {
        let mut reports = Vec::new();
        for (kind, dir) in [
            (DatasetKind::Asn, asn_dir),
            (DatasetKind::City, city_dir),
            (DatasetKind::Country, country_dir),
        ] {
            reports.extend(self.load_edition(kind, dir).await?);
        }
        info!("GeoLite2 load complete ({} dataset files)", reports.len());
        Ok(reports)
    }

    /// Downloads all three editions, then loads them.
    pub async fn load_remote(&self, fetcher: &RemoteFetcher) -> Result<Vec<LoadReport>, GeoError> {
        let asn_dir = fetcher.fetch(DatasetKind::Asn).await?;
        let city_dir = fetcher.fetch(DatasetKind::City).await?;
        let country_dir = fetcher.fetch(DatasetKind::Country).await?;
        self.load_local(&asn_dir, &city_dir, &country_dir).await
    }

    /// Loads every dataset file of one edition from `dir`.
    pub async fn load_edition(
        &self,
        kind: DatasetKind,
        dir: &Path,
    ) -> Result<Vec<LoadReport>, GeoError> {
        let mut reports = Vec::new();
        for dataset in kind.datasets() {
            reports.push(self.load_dataset(dataset, &dataset.path_in(dir)).await?);
        }
        Ok(reports)
    }

    /// Loads one CSV file into `dataset`'s relation in a single transaction.
    pub async fn load_dataset(&self, dataset: Dataset, path: &Path) -> Result<LoadReport, GeoError> {
        let relation = dataset.relation();
        info!("Loading [{}] {}", dataset, path.display());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| GeoError::Csv {
                dataset: dataset.name(),
                source,
            })?;

        ensure_relation(&self.pool, relation).await?;
        ensure_history(&self.pool).await?;

        let mut tx = self.pool.begin().await?;
        let rows = match insert_rows(&mut tx, &dataset, &mut reader).await {
            Ok(rows) => rows,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of [{}] failed: {}", dataset, rollback_err);
                }
                return Err(e);
            }
        };

        let record = LoadRecord {
            dataset: dataset.name(),
            relation: relation.name.to_string(),
            source_path: path.display().to_string(),
            row_count: rows as i64,
            loaded_at_ms: chrono::Utc::now().timestamp_millis(),
        };
        insert_load_record(&mut tx, &record).await?;
        tx.commit().await?;

        info!("Loaded {} rows into {}", rows, relation.name);
        Ok(LoadReport {
            dataset: dataset.name(),
            relation: relation.name,
            rows,
            source: path.to_path_buf(),
        })
    }
}

async fn insert_rows<R: std::io::Read>(
    tx: &mut Transaction<'_, Sqlite>,
    dataset: &Dataset,
    reader: &mut csv::Reader<R>,
) -> Result<u64, GeoError> {
    let insert_sql = dataset.relation().insert_sql();
    let mut rows = 0u64;

    for result in reader.records() {
        let record = result.map_err(|source| GeoError::Csv {
            dataset: dataset.name(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let values = convert_record(dataset, &record, line)?;

        let mut query = sqlx::query(&insert_sql);
        for value in values {
            query = match value {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Text(s) => query.bind(s),
                SqlValue::Integer(i) => query.bind(i),
                SqlValue::Real(f) => query.bind(f),
            };
        }
        query
            .execute(&mut **tx)
            .await
            .map_err(|source| GeoError::Insert {
                dataset: dataset.name(),
                line,
                source,
            })?;

        rows += 1;
        if rows % LOAD_PROGRESS_INTERVAL == 0 {
            debug!("[{}] {} rows inserted", dataset, rows);
        }
    }

    Ok(rows)
}
