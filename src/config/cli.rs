//! Command-line interface definition.
//!
//! The binary parses [`Cli`] and turns it into a library [`Config`] with
//! [`Cli::config`]; nothing below this module reads CLI state.
//!
//! # Examples
//!
//! ```bash
//! # Load extracted editions from disk, dropping any previous data
//! geolite2_store load-local --asn ./GeoLite2-ASN-CSV_20240102 \
//!     --city ./GeoLite2-City-CSV_20240102 --country ./GeoLite2-Country-CSV_20240102 --fresh
//!
//! # Download from MaxMind (key from MAXMIND_LICENSE_KEY or .env)
//! geolite2_store load-remote --staging-dir /var/tmp/geolite2
//!
//! # Query
//! geolite2_store --locale de lookup city 81.2.69.160
//! geolite2_store country-code en FR
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DB_PATH, DEFAULT_LOCALE, DEFAULT_STAGING_DIR, DOWNLOAD_TIMEOUT, MAXMIND_LICENSE_KEY_ENV,
};
use crate::config::types::{Config, LogFormat, LogLevel};
use crate::geolite2::{DatasetKind, Locale};

#[derive(Debug, Parser)]
#[command(
    name = "geolite2_store",
    version,
    about = "Loads MaxMind GeoLite2 CSV datasets into SQLite and answers IPv4 lookups."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, value_parser, default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    /// Locale joined onto `lookup city` and `lookup country`
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        default_value = DEFAULT_LOCALE,
        global = true
    )]
    pub locale: Locale,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load extracted ASN, City and Country editions from local directories
    LoadLocal {
        /// Directory holding GeoLite2-ASN-Blocks-IPv4.csv
        #[arg(long)]
        asn: PathBuf,

        /// Directory holding GeoLite2-City-Blocks-IPv4.csv and its locations
        #[arg(long)]
        city: PathBuf,

        /// Directory holding GeoLite2-Country-Blocks-IPv4.csv and its locations
        #[arg(long)]
        country: PathBuf,

        /// Drop previously loaded relations first
        #[arg(long)]
        fresh: bool,
    },

    /// Download, verify and load all three editions from MaxMind
    LoadRemote {
        /// MaxMind license key
        #[arg(long, env = MAXMIND_LICENSE_KEY_ENV, hide_env_values = true)]
        license_key: Option<String>,

        /// Directory receiving extracted editions
        #[arg(long, value_parser, default_value = DEFAULT_STAGING_DIR)]
        staging_dir: PathBuf,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DOWNLOAD_TIMEOUT.as_secs())]
        timeout_seconds: u64,

        /// Drop previously loaded relations first
        #[arg(long)]
        fresh: bool,
    },

    /// Find the block containing an IPv4 address
    Lookup {
        #[arg(value_enum, ignore_case = true)]
        kind: DatasetKind,
        ip: String,
    },

    /// List blocks announced by an AS number
    AsnNumber { number: u32 },

    /// List blocks whose AS organization equals NAME exactly
    AsnName { name: String },

    /// List every AS number with its organization
    Organizations,

    /// List city blocks in COUNTRY whose first subdivision is SUBDIVISION
    CityCode {
        #[arg(value_enum, ignore_case = true)]
        locale: Locale,
        country: String,
        subdivision: String,
    },

    /// List country blocks by ISO country code
    CountryCode {
        #[arg(value_enum, ignore_case = true)]
        locale: Locale,
        code: String,
    },

    /// List country blocks by continent code
    ContinentCode {
        #[arg(value_enum, ignore_case = true)]
        locale: Locale,
        code: String,
    },

    /// Show committed loads, most recent first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Cli {
    /// Library configuration for this invocation.
    pub fn config(&self) -> Config {
        let mut config = Config {
            db_path: self.db_path.clone(),
            default_locale: self.locale,
            ..Default::default()
        };
        if let Command::LoadRemote {
            license_key,
            staging_dir,
            timeout_seconds,
            ..
        } = &self.command
        {
            config.license_key = license_key.clone();
            config.staging_dir = staging_dir.clone();
            config.download_timeout = Duration::from_secs(*timeout_seconds);
        }
        config
    }
}
