//! Error type definitions.
//!
//! This module defines all error types used throughout the crate.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file or its parent directory.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Errors raised by the range codec, the load pipeline, remote acquisition
/// and the lookup service.
#[derive(Error, Debug)]
pub enum GeoError {
    /// Input is not IPv4 CIDR notation.
    #[error("Malformed CIDR network: {0:?}")]
    MalformedCidr(String),

    /// Input is not a dotted-quad IPv4 address.
    #[error("Malformed IPv4 address: {0:?}")]
    MalformedAddress(String),

    /// A CSV field could not be converted to its column type.
    #[error("Malformed row in {dataset} at line {line}, column {column}: {reason}")]
    MalformedRow {
        dataset: String,
        line: u64,
        column: &'static str,
        reason: String,
    },

    /// The CSV source itself could not be opened or read.
    #[error("Failed to read CSV for {dataset}: {source}")]
    Csv {
        dataset: String,
        #[source]
        source: csv::Error,
    },

    /// The store rejected a row during a load.
    #[error("Failed to insert {dataset} row at line {line}: {source}")]
    Insert {
        dataset: String,
        line: u64,
        #[source]
        source: sqlx::Error,
    },

    /// The checksum manifest does not have the `<sha256> <filename>` shape.
    #[error("Malformed checksum manifest for {edition}: {reason}")]
    MalformedManifest { edition: String, reason: String },

    /// Downloaded archive does not hash to the manifest digest.
    #[error("SHA-256 mismatch for {file}: manifest {expected}, computed {actual}")]
    IntegrityFailure {
        file: String,
        expected: String,
        actual: String,
    },

    /// Remote acquisition was requested without a MaxMind license key.
    #[error("MaxMind license key missing (set {0} or pass --license-key)")]
    MissingLicenseKey(&'static str),

    /// Remote server answered with a non-success status.
    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Remote payload exceeds the configured size limit.
    #[error("Download of {url} too large: {size} bytes (max: {max} bytes)")]
    DownloadTooLarge { url: String, size: u64, max: u64 },

    /// Transport-level HTTP failure (connect, timeout, body).
    ///
    /// The reqwest message is inlined and not exposed as a source, so `{:#}`
    /// prints it once.
    #[error("HTTP error: {0}")]
    Http(ReqwestError),

    /// Archive could not be read or contains unsafe entries.
    #[error("Archive extraction failed for {archive}: {reason}")]
    Archive { archive: String, reason: String },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store failure outside of a row insert.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The relation backing a query is missing or empty.
    #[error("{0} has not been loaded")]
    DataNotLoaded(&'static str),

    /// The relation has data but nothing matches the query.
    #[error("No record in {relation} matches {query}")]
    NotFound {
        relation: &'static str,
        query: String,
    },
}

// Download URLs carry the license key as a query parameter.
impl From<ReqwestError> for GeoError {
    fn from(e: ReqwestError) -> Self {
        GeoError::Http(e.without_url())
    }
}

impl From<sqlx::Error> for GeoError {
    fn from(e: sqlx::Error) -> Self {
        GeoError::Database(DatabaseError::SqlError(e))
    }
}

/// Coarse classification of a [`GeoError`].
///
/// Callers use this to tell "nothing loaded yet" apart from "loaded but no
/// match", and to pick process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorCategory {
    /// Bad CIDR, IP, CSV row or manifest.
    MalformedInput,
    /// Checksum mismatch on a downloaded archive.
    IntegrityFailure,
    /// Network, disk, archive or store unavailable.
    IoFailure,
    /// Query against an empty or missing relation.
    DataNotLoaded,
    /// Relation has data but nothing matches.
    NotFound,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::MalformedInput => "Malformed input",
            ErrorCategory::IntegrityFailure => "Integrity failure",
            ErrorCategory::IoFailure => "I/O failure",
            ErrorCategory::DataNotLoaded => "Data not loaded",
            ErrorCategory::NotFound => "Not found",
        }
    }

    /// Process exit code used by the CLI for this category.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::IoFailure => 1,
            ErrorCategory::MalformedInput => 2,
            ErrorCategory::IntegrityFailure => 3,
            ErrorCategory::DataNotLoaded => 4,
            ErrorCategory::NotFound => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::MalformedInput.as_str(), "Malformed input");
        assert_eq!(ErrorCategory::DataNotLoaded.to_string(), "Data not loaded");
        assert_eq!(ErrorCategory::NotFound.as_str(), "Not found");
    }

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let codes: HashSet<i32> = ErrorCategory::iter().map(|c| c.exit_code()).collect();
        assert_eq!(codes.len(), ErrorCategory::iter().count());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_http_status_message_is_decimal() {
        let err = GeoError::HttpStatus {
            url: "https://example.test/archive".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("HTTP status 404"));
    }

    #[test]
    fn test_malformed_row_names_dataset_line_and_column() {
        let err = GeoError::MalformedRow {
            dataset: "GeoLite2-ASN-Blocks-IPv4".to_string(),
            line: 3,
            column: "autonomous_system_number",
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GeoLite2-ASN-Blocks-IPv4"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("autonomous_system_number"));
    }

    #[test]
    fn test_sqlx_error_converts_to_database_variant() {
        let err: GeoError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, GeoError::Database(DatabaseError::SqlError(_))));
    }
}
