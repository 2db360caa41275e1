//! Relation catalogue.
//!
//! Each GeoLite2 dataset lands in one relation. Tables are declared with
//! `CREATE TABLE IF NOT EXISTS` immediately before each load; there are no
//! migrations. Block relations carry the network string plus the
//! precomputed `start_ip`/`end_ip` bounds used for containment queries.

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// How a CSV field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// CIDR network; expands to `network`, `start_ip`, `end_ip`.
    Network,
    Text,
    Integer,
    Real,
    /// `0`/`1` flag stored as INTEGER.
    Flag,
    /// Tagged from the dataset's locale rather than the CSV field.
    Locale,
}

/// A column in CSV order.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Empty fields are rejected instead of stored as NULL.
    pub required: bool,
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column {
        name,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, kind: ColumnKind) -> Column {
    Column {
        name,
        kind,
        required: true,
    }
}

/// A persisted relation and the CSV columns that feed it.
#[derive(Debug)]
pub struct Relation {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// `(index name, column list)` pairs.
    pub indexes: &'static [(&'static str, &'static str)],
}

pub const ASN_BLOCKS: Relation = Relation {
    name: "geolite2_asn_blocks_ipv4",
    columns: &[
        col("network", ColumnKind::Network),
        required("autonomous_system_number", ColumnKind::Integer),
        col("autonomous_system_organization", ColumnKind::Text),
    ],
    indexes: &[
        ("idx_geolite2_asn_blocks_range", "start_ip, end_ip"),
        ("idx_geolite2_asn_blocks_number", "autonomous_system_number"),
        ("idx_geolite2_asn_blocks_org", "autonomous_system_organization"),
    ],
};

pub const CITY_BLOCKS: Relation = Relation {
    name: "geolite2_city_blocks_ipv4",
    columns: &[
        col("network", ColumnKind::Network),
        col("geoname_id", ColumnKind::Integer),
        col("registered_country_geoname_id", ColumnKind::Integer),
        col("represented_country_geoname_id", ColumnKind::Integer),
        col("is_anonymous_proxy", ColumnKind::Flag),
        col("is_satellite_provider", ColumnKind::Flag),
        col("postal_code", ColumnKind::Text),
        col("latitude", ColumnKind::Real),
        col("longitude", ColumnKind::Real),
        col("accuracy_radius", ColumnKind::Integer),
    ],
    indexes: &[
        ("idx_geolite2_city_blocks_range", "start_ip, end_ip"),
        ("idx_geolite2_city_blocks_geoname", "geoname_id"),
    ],
};

pub const CITY_LOCATIONS: Relation = Relation {
    name: "geolite2_city_locations",
    columns: &[
        col("geoname_id", ColumnKind::Integer),
        col("locale_code", ColumnKind::Locale),
        col("continent_code", ColumnKind::Text),
        col("continent_name", ColumnKind::Text),
        col("country_iso_code", ColumnKind::Text),
        col("country_name", ColumnKind::Text),
        col("subdivision_1_iso_code", ColumnKind::Text),
        col("subdivision_1_name", ColumnKind::Text),
        col("subdivision_2_iso_code", ColumnKind::Text),
        col("subdivision_2_name", ColumnKind::Text),
        col("city_name", ColumnKind::Text),
        col("metro_code", ColumnKind::Text),
        col("time_zone", ColumnKind::Text),
        col("is_in_european_union", ColumnKind::Flag),
    ],
    indexes: &[
        ("idx_geolite2_city_locations_geoname", "geoname_id, locale_code"),
        (
            "idx_geolite2_city_locations_region",
            "locale_code, country_iso_code, subdivision_1_iso_code",
        ),
    ],
};

pub const COUNTRY_BLOCKS: Relation = Relation {
    name: "geolite2_country_blocks_ipv4",
    columns: &[
        col("network", ColumnKind::Network),
        col("geoname_id", ColumnKind::Integer),
        col("registered_country_geoname_id", ColumnKind::Integer),
        col("represented_country_geoname_id", ColumnKind::Integer),
        col("is_anonymous_proxy", ColumnKind::Flag),
        col("is_satellite_provider", ColumnKind::Flag),
    ],
    indexes: &[
        ("idx_geolite2_country_blocks_range", "start_ip, end_ip"),
        ("idx_geolite2_country_blocks_geoname", "geoname_id"),
    ],
};

pub const COUNTRY_LOCATIONS: Relation = Relation {
    name: "geolite2_country_locations",
    columns: &[
        col("geoname_id", ColumnKind::Integer),
        col("locale_code", ColumnKind::Locale),
        col("continent_code", ColumnKind::Text),
        col("continent_name", ColumnKind::Text),
        col("country_iso_code", ColumnKind::Text),
        col("country_name", ColumnKind::Text),
        col("is_in_european_union", ColumnKind::Flag),
    ],
    indexes: &[
        ("idx_geolite2_country_locations_geoname", "geoname_id, locale_code"),
        (
            "idx_geolite2_country_locations_region",
            "locale_code, country_iso_code, continent_code",
        ),
    ],
};

/// Every data relation, in load order.
pub const ALL_RELATIONS: [&Relation; 5] = [
    &ASN_BLOCKS,
    &CITY_BLOCKS,
    &CITY_LOCATIONS,
    &COUNTRY_BLOCKS,
    &COUNTRY_LOCATIONS,
];

impl Relation {
    /// True if rows carry a CIDR network and derived bounds.
    pub fn is_ranged(&self) -> bool {
        self.columns.iter().any(|c| c.kind == ColumnKind::Network)
    }

    /// Stored column names in insert order.
    pub fn stored_columns(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.columns.len() + 2);
        for column in self.columns {
            names.push(column.name);
            if column.kind == ColumnKind::Network {
                names.push("start_ip");
                names.push("end_ip");
            }
        }
        names
    }

    /// `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_table_sql(&self) -> String {
        let mut defs = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        for column in self.columns {
            match column.kind {
                ColumnKind::Network => {
                    defs.push(format!("{} TEXT NOT NULL", column.name));
                    defs.push("start_ip INTEGER NOT NULL".to_string());
                    defs.push("end_ip INTEGER NOT NULL".to_string());
                }
                ColumnKind::Text => defs.push(format!("{} TEXT{}", column.name, not_null(column))),
                ColumnKind::Integer | ColumnKind::Flag => {
                    defs.push(format!("{} INTEGER{}", column.name, not_null(column)))
                }
                ColumnKind::Real => defs.push(format!("{} REAL{}", column.name, not_null(column))),
                ColumnKind::Locale => defs.push(format!("{} TEXT NOT NULL", column.name)),
            }
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            defs.join(",\n    ")
        )
    }

    /// `CREATE INDEX IF NOT EXISTS` statements.
    pub fn create_index_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|(index, columns)| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    index, self.name, columns
                )
            })
            .collect()
    }

    /// Parameterized insert covering every stored column.
    pub fn insert_sql(&self) -> String {
        let columns = self.stored_columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            columns.join(", "),
            placeholders
        )
    }
}

fn not_null(column: &Column) -> &'static str {
    if column.required {
        " NOT NULL"
    } else {
        ""
    }
}

/// Declares `relation` and its indexes if absent.
pub async fn ensure_relation(
    pool: &Pool<Sqlite>,
    relation: &Relation,
) -> Result<(), DatabaseError> {
    sqlx::query(&relation.create_table_sql())
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    for statement in relation.create_index_sql() {
        sqlx::query(&statement)
            .execute(pool)
            .await
            .map_err(DatabaseError::SqlError)?;
    }
    Ok(())
}

/// True if `relation` exists and holds at least one row.
pub async fn relation_has_rows(
    pool: &Pool<Sqlite>,
    relation: &Relation,
) -> Result<bool, DatabaseError> {
    if !relation_exists(pool, relation.name).await? {
        return Ok(false);
    }
    let has_rows: bool =
        sqlx::query_scalar(&format!("SELECT EXISTS(SELECT 1 FROM {})", relation.name))
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::SqlError)?;
    Ok(has_rows)
}

/// Number of rows in `relation`; zero if the table does not exist.
pub async fn count_rows(pool: &Pool<Sqlite>, relation: &Relation) -> Result<i64, DatabaseError> {
    if !relation_exists(pool, relation.name).await? {
        return Ok(0);
    }
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", relation.name))
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)
}

async fn relation_exists(pool: &Pool<Sqlite>, name: &str) -> Result<bool, DatabaseError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?")
            .bind(name)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::SqlError)?;
    Ok(count > 0)
}

/// Drops every GeoLite2 data relation ahead of a fresh load.
pub async fn drop_all_relations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    for relation in ALL_RELATIONS {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", relation.name))
            .execute(pool)
            .await
            .map_err(DatabaseError::SqlError)?;
        log::debug!("Dropped {}", relation.name);
    }
    Ok(())
}
