// Shared test helpers for store setup and GeoLite2 fixture editions.
//
// This module writes small but complete ASN, City and Country editions to disk
// so integration tests can drive the public API end to end.

use std::path::{Path, PathBuf};

use geolite2_store::{init_db_pool_with_path, Config, DbPool, Locale};
use strum::IntoEnumIterator;

pub const ASN_BLOCKS: &str = "\
network,autonomous_system_number,autonomous_system_organization
1.0.0.0/24,13335,CLOUDFLARENET
8.8.8.0/24,15169,GOOGLE
8.8.4.0/24,15169,GOOGLE
";

pub const CITY_BLOCKS: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider,postal_code,latitude,longitude,accuracy_radius
81.2.69.160/27,2643743,2635167,,0,0,,51.5142,-0.0931,10
175.16.199.0/24,2038180,1814991,,0,0,,43.88,125.3228,100
";

pub const COUNTRY_BLOCKS: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
81.2.69.160/27,2635167,2635167,,0,0
175.16.199.0/24,1814991,1814991,,0,0
";

/// City locations for `locale`, with names suffixed by the locale so tests can
/// tell which file a row came from.
pub fn city_locations(locale: Locale) -> String {
    format!(
        "geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,subdivision_1_iso_code,subdivision_1_name,subdivision_2_iso_code,subdivision_2_name,city_name,metro_code,time_zone,is_in_european_union
2643743,{l},EU,Europe,GB,United Kingdom,ENG,England,,,London {l},,Europe/London,0
2038180,{l},AS,Asia,CN,China,22,Jilin Sheng,,,Changchun {l},,Asia/Harbin,0
",
        l = locale
    )
}

pub fn country_locations(locale: Locale) -> String {
    format!(
        "geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,is_in_european_union
2635167,{l},EU,Europe,GB,United Kingdom {l},0
1814991,{l},AS,Asia,CN,China {l},0
",
        l = locale
    )
}

/// Extracted edition directories under one root.
pub struct Editions {
    pub asn: PathBuf,
    pub city: PathBuf,
    pub country: PathBuf,
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::create_dir_all(dir).expect("Failed to create edition directory");
    std::fs::write(dir.join(name), contents).expect("Failed to write fixture CSV");
}

/// Writes all three editions, every locale included, under `root`.
#[allow(dead_code)] // Used by other test files
pub fn write_editions(root: &Path) -> Editions {
    let editions = Editions {
        asn: root.join("GeoLite2-ASN-CSV_20240102"),
        city: root.join("GeoLite2-City-CSV_20240102"),
        country: root.join("GeoLite2-Country-CSV_20240102"),
    };

    write(&editions.asn, "GeoLite2-ASN-Blocks-IPv4.csv", ASN_BLOCKS);
    write(&editions.city, "GeoLite2-City-Blocks-IPv4.csv", CITY_BLOCKS);
    write(
        &editions.country,
        "GeoLite2-Country-Blocks-IPv4.csv",
        COUNTRY_BLOCKS,
    );
    for locale in Locale::iter() {
        write(
            &editions.city,
            &format!("GeoLite2-City-Locations-{}.csv", locale),
            &city_locations(locale),
        );
        write(
            &editions.country,
            &format!("GeoLite2-Country-Locations-{}.csv", locale),
            &country_locations(locale),
        );
    }

    editions
}

/// Creates a file-backed store under `dir`.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool(dir: &Path) -> DbPool {
    let config = Config::default();
    init_db_pool_with_path(&dir.join("geolite2.db"), &config)
        .await
        .expect("Failed to create test database pool")
}
