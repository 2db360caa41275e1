//! Configuration constants.
//!
//! This module defines the constants used throughout the crate: dataset file
//! prefixes, MaxMind endpoints, timeouts and size limits.

use std::time::Duration;

/// Default SQLite database path.
pub const DB_PATH: &str = "./geolite2.db";

/// Default staging directory for downloaded archives.
pub const DEFAULT_STAGING_DIR: &str = ".geolite2_staging";

/// Locale joined onto City/Country address lookups unless configured otherwise.
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variable name for MaxMind license key
pub const MAXMIND_LICENSE_KEY_ENV: &str = "MAXMIND_LICENSE_KEY";

/// MaxMind download base URL
pub const MAXMIND_DOWNLOAD_BASE: &str = "https://download.maxmind.com/app/geoip_download";

// Edition ids of the CSV archives
pub const ASN_EDITION_ID: &str = "GeoLite2-ASN-CSV";
pub const CITY_EDITION_ID: &str = "GeoLite2-City-CSV";
pub const COUNTRY_EDITION_ID: &str = "GeoLite2-Country-CSV";

// File name prefixes inside an extracted edition
pub const ASN_BLOCKS_IPV4_FILE_PREFIX: &str = "GeoLite2-ASN-Blocks-IPv4";
pub const CITY_BLOCKS_IPV4_FILE_PREFIX: &str = "GeoLite2-City-Blocks-IPv4";
pub const CITY_LOCATIONS_FILE_PREFIX: &str = "GeoLite2-City-Locations";
pub const COUNTRY_BLOCKS_IPV4_FILE_PREFIX: &str = "GeoLite2-Country-Blocks-IPv4";
pub const COUNTRY_LOCATIONS_FILE_PREFIX: &str = "GeoLite2-Country-Locations";

/// Deadline for a single archive or manifest request.
/// The City edition is roughly 45MB zipped, so this is generous.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Maximum accepted archive size in bytes (200MB)
pub const MAX_DOWNLOAD_SIZE: u64 = 200 * 1024 * 1024;

/// Maximum accepted checksum manifest size in bytes
pub const MAX_MANIFEST_SIZE: u64 = 4 * 1024;

/// How long a SQLite connection waits on a locked database before failing.
pub const STORE_BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a caller waits for a pooled connection.
pub const STORE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum pooled SQLite connections.
pub const STORE_MAX_CONNECTIONS: u32 = 4;

/// Number of rows between progress log lines during a load.
pub const LOAD_PROGRESS_INTERVAL: u64 = 100_000;
