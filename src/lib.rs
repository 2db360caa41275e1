//! geolite2_store library: MaxMind GeoLite2 CSV ingestion and IPv4 lookups
//!
//! This library loads the GeoLite2 ASN, City and Country CSV editions into a
//! SQLite store (from a local directory or straight from MaxMind) and answers
//! address, AS and region queries against them.
//!
//! # Example
//!
//! ```no_run
//! use geolite2_store::{init_db_pool, Config, GeoLite2, Loader};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let pool = init_db_pool(&config).await?;
//!
//! Loader::new(pool.clone())
//!     .load_local(
//!         Path::new("GeoLite2-ASN-CSV_20240102"),
//!         Path::new("GeoLite2-City-CSV_20240102"),
//!         Path::new("GeoLite2-Country-CSV_20240102"),
//!     )
//!     .await?;
//!
//! let geo = GeoLite2::new(pool, &config);
//! let city = geo.city_block("81.2.69.160").await?;
//! println!("{:?}", city.location.and_then(|l| l.city_name));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod error_handling;
mod fetch;
pub mod geolite2;
pub mod initialization;
mod loader;
mod lookup;
pub mod range;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{DatabaseError, ErrorCategory, GeoError, InitializationError};
pub use fetch::RemoteFetcher;
pub use geolite2::{
    AsnBlock, CityBlock, CityLocation, CountryBlock, CountryLocation, Dataset, DatasetKind,
    Locale, Organization, Record, RegionBlocks,
};
pub use loader::{LoadReport, Loader};
pub use lookup::GeoLite2;
pub use range::{decode_ip, encode_cidr, encode_ip, AddressRange};
pub use storage::{init_db_pool, init_db_pool_with_path, query_load_history, DbPool, LoadRecord};
