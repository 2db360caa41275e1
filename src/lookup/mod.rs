//! Lookup service.
//!
//! Answers address and attribute queries over the loaded GeoLite2 relations.
//! Every query first checks that its relations hold data, so callers can tell
//! [`GeoError::DataNotLoaded`] apart from [`GeoError::NotFound`].

mod queries;
mod rows;

use log::debug;
use sqlx::sqlite::SqliteRow;

use crate::config::Config;
use crate::error_handling::GeoError;
use crate::geolite2::{AsnBlock, CityBlock, CountryBlock, DatasetKind, Locale, Organization};
use crate::geolite2::{Record, RegionBlocks};
use crate::range::encode_ip;
use crate::storage::history::query_load_history;
use crate::storage::schema::{
    count_rows, relation_has_rows, Relation, ASN_BLOCKS, CITY_BLOCKS, CITY_LOCATIONS,
    COUNTRY_BLOCKS, COUNTRY_LOCATIONS,
};
use crate::storage::{DbPool, LoadRecord};

use queries::{asn_where, by_address, joined_where, CITY_JOINED, COUNTRY_JOINED, ORGANIZATIONS};
use rows::{asn_block_from_row, city_block_from_row, country_block_from_row, organization_from_row};

/// Read-only query facade over the GeoLite2 store.
///
/// Address lookups on City and Country join the location rows of the
/// service's locale; the `blocks_by_*` queries take the locale explicitly.
///
/// # Example
///
/// ```no_run
/// use geolite2_store::{init_db_pool, Config, GeoLite2};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let pool = init_db_pool(&config).await?;
/// let geo = GeoLite2::new(pool, &config);
/// let block = geo.asn_block("8.8.8.8").await?;
/// println!("{} -> AS{} {}", block.network, block.organization.number, block.organization.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeoLite2 {
    pool: DbPool,
    locale: Locale,
}

impl GeoLite2 {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        Self::with_locale(pool, config.default_locale)
    }

    pub fn with_locale(pool: DbPool, locale: Locale) -> Self {
        Self { pool, locale }
    }

    /// Locale joined onto address lookups.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Finds the block of `kind` containing `ip`.
    pub async fn lookup_by_address(&self, kind: DatasetKind, ip: &str) -> Result<Record, GeoError> {
        match kind {
            DatasetKind::Asn => self.asn_block(ip).await.map(Record::Asn),
            DatasetKind::City => self.city_block(ip).await.map(Record::City),
            DatasetKind::Country => self.country_block(ip).await.map(Record::Country),
        }
    }

    pub async fn asn_block(&self, ip: &str) -> Result<AsnBlock, GeoError> {
        let value = encode_ip(ip)?;
        self.require_loaded(&ASN_BLOCKS).await?;

        let row = sqlx::query(&asn_where("? BETWEEN start_ip AND end_ip LIMIT 1"))
            .bind(i64::from(value))
            .fetch_optional(self.pool.as_ref())
            .await?;
        let row = found(row, &ASN_BLOCKS, ip)?;
        Ok(asn_block_from_row(&row)?)
    }

    pub async fn city_block(&self, ip: &str) -> Result<CityBlock, GeoError> {
        let value = encode_ip(ip)?;
        self.require_loaded(&CITY_BLOCKS).await?;
        self.require_loaded(&CITY_LOCATIONS).await?;

        let row = sqlx::query(&by_address(CITY_JOINED))
            .bind(self.locale.as_str())
            .bind(i64::from(value))
            .fetch_optional(self.pool.as_ref())
            .await?;
        let row = found(row, &CITY_BLOCKS, ip)?;
        Ok(city_block_from_row(&row)?)
    }

    pub async fn country_block(&self, ip: &str) -> Result<CountryBlock, GeoError> {
        let value = encode_ip(ip)?;
        self.require_loaded(&COUNTRY_BLOCKS).await?;
        self.require_loaded(&COUNTRY_LOCATIONS).await?;

        let row = sqlx::query(&by_address(COUNTRY_JOINED))
            .bind(self.locale.as_str())
            .bind(i64::from(value))
            .fetch_optional(self.pool.as_ref())
            .await?;
        let row = found(row, &COUNTRY_BLOCKS, ip)?;
        Ok(country_block_from_row(&row)?)
    }

    /// Every block announced by AS `number`.
    pub async fn blocks_by_asn_number(&self, number: u32) -> Result<Vec<AsnBlock>, GeoError> {
        self.require_loaded(&ASN_BLOCKS).await?;
        let rows = sqlx::query(&asn_where("autonomous_system_number = ?"))
            .bind(i64::from(number))
            .fetch_all(self.pool.as_ref())
            .await?;
        map_rows(&rows, asn_block_from_row)
    }

    /// Every block whose organization name equals `name` exactly.
    pub async fn blocks_by_asn_name(&self, name: &str) -> Result<Vec<AsnBlock>, GeoError> {
        self.require_loaded(&ASN_BLOCKS).await?;
        let rows = sqlx::query(&asn_where("autonomous_system_organization = ?"))
            .bind(name)
            .fetch_all(self.pool.as_ref())
            .await?;
        map_rows(&rows, asn_block_from_row)
    }

    /// One organization per AS number, ordered by number.
    pub async fn organizations(&self) -> Result<Vec<Organization>, GeoError> {
        self.require_loaded(&ASN_BLOCKS).await?;
        let rows = sqlx::query(ORGANIZATIONS)
            .fetch_all(self.pool.as_ref())
            .await?;
        map_rows(&rows, organization_from_row)
    }

    /// City blocks in `country` whose first-level subdivision is `subdivision`.
    pub async fn blocks_by_city_code(
        &self,
        locale: Locale,
        country: &str,
        subdivision: &str,
    ) -> Result<Vec<CityBlock>, GeoError> {
        self.require_loaded(&CITY_BLOCKS).await?;
        self.require_loaded(&CITY_LOCATIONS).await?;
        let sql = joined_where(
            CITY_JOINED,
            "l.country_iso_code = ? AND l.subdivision_1_iso_code = ?",
        );
        let rows = sqlx::query(&sql)
            .bind(locale.as_str())
            .bind(country)
            .bind(subdivision)
            .fetch_all(self.pool.as_ref())
            .await?;
        map_rows(&rows, city_block_from_row)
    }

    pub async fn blocks_by_country_code(
        &self,
        locale: Locale,
        country: &str,
    ) -> Result<Vec<CountryBlock>, GeoError> {
        self.country_blocks_where(locale, "l.country_iso_code = ?", country)
            .await
    }

    pub async fn blocks_by_continent_code(
        &self,
        locale: Locale,
        continent: &str,
    ) -> Result<Vec<CountryBlock>, GeoError> {
        self.country_blocks_where(locale, "l.continent_code = ?", continent)
            .await
    }

    /// City blocks when `subdivision` is given, country blocks otherwise.
    pub async fn lookup_by_region(
        &self,
        locale: Locale,
        country: &str,
        subdivision: Option<&str>,
    ) -> Result<RegionBlocks, GeoError> {
        match subdivision {
            Some(subdivision) => self
                .blocks_by_city_code(locale, country, subdivision)
                .await
                .map(RegionBlocks::City),
            None => self
                .blocks_by_country_code(locale, country)
                .await
                .map(RegionBlocks::Country),
        }
    }

    /// Rows currently stored in `relation`; zero if it was never loaded.
    pub async fn row_count(&self, relation: &Relation) -> Result<i64, GeoError> {
        Ok(count_rows(&self.pool, relation).await?)
    }

    /// Committed loads, most recent first.
    pub async fn load_history(&self, limit: Option<usize>) -> Result<Vec<LoadRecord>, GeoError> {
        Ok(query_load_history(&self.pool, limit).await?)
    }

    async fn country_blocks_where(
        &self,
        locale: Locale,
        condition: &str,
        value: &str,
    ) -> Result<Vec<CountryBlock>, GeoError> {
        self.require_loaded(&COUNTRY_BLOCKS).await?;
        self.require_loaded(&COUNTRY_LOCATIONS).await?;
        let rows = sqlx::query(&joined_where(COUNTRY_JOINED, condition))
            .bind(locale.as_str())
            .bind(value)
            .fetch_all(self.pool.as_ref())
            .await?;
        map_rows(&rows, country_block_from_row)
    }

    async fn require_loaded(&self, relation: &'static Relation) -> Result<(), GeoError> {
        if relation_has_rows(&self.pool, relation).await? {
            Ok(())
        } else {
            debug!("Query against empty relation {}", relation.name);
            Err(GeoError::DataNotLoaded(relation.name))
        }
    }
}

fn found(row: Option<SqliteRow>, relation: &Relation, ip: &str) -> Result<SqliteRow, GeoError> {
    row.ok_or_else(|| GeoError::NotFound {
        relation: relation.name,
        query: ip.trim().to_string(),
    })
}

fn map_rows<T>(
    rows: &[SqliteRow],
    map: fn(&SqliteRow) -> Result<T, sqlx::Error>,
) -> Result<Vec<T>, GeoError> {
    rows.iter()
        .map(|row| map(row).map_err(GeoError::from))
        .collect()
}
