//! Configuration types.
//!
//! This module defines the logging enums used by the CLI and the library
//! `Config` passed explicitly into the loader, fetcher and lookup service.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DB_PATH, DEFAULT_STAGING_DIR, DOWNLOAD_TIMEOUT, MAXMIND_DOWNLOAD_BASE, MAX_DOWNLOAD_SIZE,
    STORE_ACQUIRE_TIMEOUT, STORE_BUSY_TIMEOUT, STORE_MAX_CONNECTIONS,
};
use crate::geolite2::Locale;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Everything the loader, fetcher and lookup service need is carried here
/// rather than read from process-wide state.
///
/// # Examples
///
/// ```no_run
/// use geolite2_store::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/geolite2/geolite2.db"),
///     license_key: Some("my-license-key".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Directory that receives downloaded archives and extracted editions
    pub staging_dir: PathBuf,

    /// Locale joined onto City/Country address lookups
    pub default_locale: Locale,

    /// MaxMind license key used for remote acquisition
    pub license_key: Option<String>,

    /// Base URL of the MaxMind download endpoint
    pub download_base: String,

    /// Deadline for each HTTP request
    pub download_timeout: Duration,

    /// Maximum accepted archive size in bytes
    pub max_download_size: u64,

    /// SQLite busy timeout
    pub store_busy_timeout: Duration,

    /// Pool acquire timeout
    pub store_acquire_timeout: Duration,

    /// Maximum pooled connections
    pub store_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            default_locale: Locale::En,
            license_key: None,
            download_base: MAXMIND_DOWNLOAD_BASE.to_string(),
            download_timeout: DOWNLOAD_TIMEOUT,
            max_download_size: MAX_DOWNLOAD_SIZE,
            store_busy_timeout: STORE_BUSY_TIMEOUT,
            store_acquire_timeout: STORE_ACQUIRE_TIMEOUT,
            store_max_connections: STORE_MAX_CONNECTIONS,
        }
    }
}
