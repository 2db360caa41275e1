//! Error categorization.
//!
//! Maps every [`GeoError`] variant onto the coarse [`ErrorCategory`]
//! taxonomy surfaced to callers.

use super::types::{ErrorCategory, GeoError};

impl GeoError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoError::MalformedCidr(_)
            | GeoError::MalformedAddress(_)
            | GeoError::MalformedRow { .. }
            | GeoError::MalformedManifest { .. }
            | GeoError::MissingLicenseKey(_) => ErrorCategory::MalformedInput,
            // A CSV that parses as bytes but not as records is bad input; a
            // CSV that cannot be opened is an I/O problem.
            GeoError::Csv { source, .. } => match source.kind() {
                csv::ErrorKind::Io(_) => ErrorCategory::IoFailure,
                _ => ErrorCategory::MalformedInput,
            },
            GeoError::IntegrityFailure { .. } => ErrorCategory::IntegrityFailure,
            GeoError::Insert { .. }
            | GeoError::HttpStatus { .. }
            | GeoError::DownloadTooLarge { .. }
            | GeoError::Http(_)
            | GeoError::Archive { .. }
            | GeoError::Io(_)
            | GeoError::Database(_) => ErrorCategory::IoFailure,
            GeoError::DataNotLoaded(_) => ErrorCategory::DataNotLoaded,
            GeoError::NotFound { .. } => ErrorCategory::NotFound,
        }
    }

    /// True when the relation backing a query has no rows yet.
    pub fn is_data_not_loaded(&self) -> bool {
        self.category() == ErrorCategory::DataNotLoaded
    }

    /// True when the relation has rows but none match.
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}
