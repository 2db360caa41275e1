//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`GeoError`, `DatabaseError`, `InitializationError`)
//! - Categorization of errors into the caller-facing taxonomy
//!
//! Categories:
//! - **MalformedInput**: bad CIDR, IP, CSV row or checksum manifest
//! - **IntegrityFailure**: downloaded archive does not match its manifest
//! - **IoFailure**: network, disk, archive or store unavailable
//! - **DataNotLoaded**: query against an empty relation
//! - **NotFound**: relation loaded, nothing matches

mod categorization;
mod types;

// Re-export public API
pub use types::{DatabaseError, ErrorCategory, GeoError, InitializationError};
