//! Shared test helpers for module tests.
//!
//! This module provides an in-memory store and small CSV fixtures used across
//! the loader and lookup tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use crate::storage::DbPool;

/// Creates an in-memory test database pool.
/// A single connection keeps every statement on the same in-memory database.
pub async fn create_test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    Arc::new(pool)
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test CSV");
    path
}

pub const ASN_CSV: &str = "\
network,autonomous_system_number,autonomous_system_organization
10.0.0.0/24,64500,Example Networks
192.0.2.0/24,64501,Documentation Org
";

pub const CITY_BLOCKS_CSV: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider,postal_code,latitude,longitude,accuracy_radius
10.0.0.0/24,1816670,1814991,,0,0,100000,39.9042,116.4074,50
198.51.100.0/24,2988507,3017382,,0,1,75001,48.8566,2.3522,20
";

pub const CITY_LOCATIONS_EN_CSV: &str = "\
geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,subdivision_1_iso_code,subdivision_1_name,subdivision_2_iso_code,subdivision_2_name,city_name,metro_code,time_zone,is_in_european_union
1816670,en,AS,Asia,CN,China,BJ,Beijing,,,Beijing,,Asia/Shanghai,0
2988507,en,EU,Europe,FR,France,IDF,Île-de-France,75,Paris,Paris,,Europe/Paris,1
";

pub const CITY_LOCATIONS_ZH_CSV: &str = "\
geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,subdivision_1_iso_code,subdivision_1_name,subdivision_2_iso_code,subdivision_2_name,city_name,metro_code,time_zone,is_in_european_union
1816670,zh-CN,AS,亚洲,CN,中国,BJ,北京市,,,北京,,Asia/Shanghai,0
";

pub const COUNTRY_BLOCKS_CSV: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
10.0.0.0/24,1814991,1814991,,0,0
198.51.100.0/24,3017382,3017382,,0,0
";

pub const COUNTRY_LOCATIONS_EN_CSV: &str = "\
geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,is_in_european_union
1814991,en,AS,Asia,CN,China,0
3017382,en,EU,Europe,FR,France,1
";
