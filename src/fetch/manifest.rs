//! Checksum manifest parsing and archive verification.

use sha2::{Digest, Sha256};

use crate::error_handling::GeoError;

/// Parsed `<sha256>  <filename>` manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Manifest {
    /// Lowercase hex digest.
    pub digest: String,
    pub file_name: String,
}

impl Manifest {
    /// Archive name without the `.zip` suffix; names the extracted directory.
    pub fn stem(&self) -> &str {
        self.file_name.trim_end_matches(".zip")
    }
}

pub(crate) fn parse_manifest(edition: &str, body: &str) -> Result<Manifest, GeoError> {
    let malformed = |reason: &str| GeoError::MalformedManifest {
        edition: edition.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = body.split_whitespace();
    let (digest, file_name) = match (fields.next(), fields.next(), fields.next()) {
        (Some(digest), Some(file_name), None) => (digest, file_name),
        (None, _, _) => return Err(malformed("manifest is empty")),
        (Some(_), None, _) => return Err(malformed("missing archive file name")),
        (Some(_), Some(_), Some(_)) => return Err(malformed("unexpected trailing fields")),
    };

    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed("digest is not 64 hex characters"));
    }
    // The name becomes a directory under the staging dir.
    if !file_name.ends_with(".zip")
        || file_name.len() == ".zip".len()
        || file_name.contains(['/', '\\'])
        || file_name.starts_with('.')
    {
        return Err(malformed("archive file name must be a plain *.zip name"));
    }

    Ok(Manifest {
        digest: digest.to_ascii_lowercase(),
        file_name: file_name.to_string(),
    })
}

/// Fails with `IntegrityFailure` unless `bytes` hash to the manifest digest.
pub(crate) fn verify_archive(manifest: &Manifest, bytes: &[u8]) -> Result<(), GeoError> {
    let actual = format!("{:x}", Sha256::digest(bytes));
    if !actual.eq_ignore_ascii_case(&manifest.digest) {
        return Err(GeoError::IntegrityFailure {
            file: manifest.file_name.clone(),
            expected: manifest.digest.clone(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_parse_manifest() {
        let body = format!("{}  GeoLite2-ASN-CSV_20240102.zip\n", EMPTY_SHA256.to_uppercase());
        let manifest = parse_manifest("GeoLite2-ASN-CSV", &body).unwrap();
        assert_eq!(manifest.digest, EMPTY_SHA256);
        assert_eq!(manifest.file_name, "GeoLite2-ASN-CSV_20240102.zip");
        assert_eq!(manifest.stem(), "GeoLite2-ASN-CSV_20240102");
    }

    #[test]
    fn test_parse_manifest_rejects_bad_shapes() {
        let bodies = vec![
            String::new(),
            EMPTY_SHA256.to_string(),
            "abc123  GeoLite2-ASN-CSV.zip".to_string(),
            format!("{}  GeoLite2-ASN-CSV.tar.gz", EMPTY_SHA256),
            format!("{}  ../escape.zip", EMPTY_SHA256),
            format!("{}  a.zip extra", EMPTY_SHA256),
        ];
        for body in &bodies {
            let err = parse_manifest("GeoLite2-ASN-CSV", body).unwrap_err();
            assert!(
                matches!(err, GeoError::MalformedManifest { .. }),
                "{:?} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_verify_archive() {
        let manifest = Manifest {
            digest: EMPTY_SHA256.to_string(),
            file_name: "empty.zip".to_string(),
        };
        assert!(verify_archive(&manifest, b"").is_ok());

        match verify_archive(&manifest, b"not empty").unwrap_err() {
            GeoError::IntegrityFailure { file, expected, .. } => {
                assert_eq!(file, "empty.zip");
                assert_eq!(expected, EMPTY_SHA256);
            }
            other => panic!("expected IntegrityFailure, got {:?}", other),
        }
    }
}
