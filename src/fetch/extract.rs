//! Archive extraction.
//!
//! MaxMind CSV archives hold a single `<edition>_<date>/` directory. The
//! archive is unpacked into a scratch directory inside the staging directory
//! and renamed into place once every entry has been written.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use crate::error_handling::GeoError;

/// Extracts `bytes` into `<staging_dir>/<stem>` and returns that path.
///
/// An existing directory of the same name is replaced. On failure the
/// scratch directory is removed and nothing is left at the target.
pub(crate) fn extract_archive(
    bytes: &[u8],
    staging_dir: &Path,
    archive_name: &str,
    stem: &str,
) -> Result<PathBuf, GeoError> {
    let archive_error = |reason: String| GeoError::Archive {
        archive: archive_name.to_string(),
        reason,
    };

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| archive_error(e.to_string()))?;

    let scratch = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(staging_dir)?;
    let staged = scratch.path().join(stem);
    fs::create_dir_all(&staged)?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_error(e.to_string()))?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(archive_error(format!(
                "entry {:?} escapes the extraction directory",
                entry.name()
            )));
        };
        // Flatten the archive's own top-level directory onto `staged`.
        let relative = relative.strip_prefix(stem).unwrap_or(&relative);
        let out_path = staged.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        log::debug!("Extracted {}", out_path.display());
    }

    let target = staging_dir.join(stem);
    if target.exists() {
        log::info!("Replacing previously extracted {}", target.display());
        fs::remove_dir_all(&target)?;
    }
    fs::rename(&staged, &target)?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn staging_entries(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_extracts_nested_edition_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let bytes = build_zip(&[
            (
                "GeoLite2-ASN-CSV_20240102/GeoLite2-ASN-Blocks-IPv4.csv",
                b"network\n",
            ),
            ("GeoLite2-ASN-CSV_20240102/LICENSE.txt", b"license"),
        ]);

        let dir = extract_archive(
            &bytes,
            temp_dir.path(),
            "GeoLite2-ASN-CSV_20240102.zip",
            "GeoLite2-ASN-CSV_20240102",
        )
        .unwrap();

        assert_eq!(dir, temp_dir.path().join("GeoLite2-ASN-CSV_20240102"));
        assert_eq!(
            fs::read_to_string(dir.join("GeoLite2-ASN-Blocks-IPv4.csv")).unwrap(),
            "network\n"
        );
        assert_eq!(
            staging_entries(temp_dir.path()),
            vec!["GeoLite2-ASN-CSV_20240102".to_string()]
        );
    }

    #[test]
    fn test_extracts_flat_archive() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let bytes = build_zip(&[("GeoLite2-ASN-Blocks-IPv4.csv", b"network\n")]);

        let dir = extract_archive(&bytes, temp_dir.path(), "flat.zip", "flat").unwrap();
        assert!(dir.join("GeoLite2-ASN-Blocks-IPv4.csv").is_file());
    }

    #[test]
    fn test_replaces_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let stale = temp_dir.path().join("edition");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("stale.csv"), "old").unwrap();

        let bytes = build_zip(&[("edition/fresh.csv", b"new")]);
        let dir = extract_archive(&bytes, temp_dir.path(), "edition.zip", "edition").unwrap();

        assert!(dir.join("fresh.csv").is_file());
        assert!(!dir.join("stale.csv").exists());
    }

    #[test]
    fn test_rejects_path_traversal_and_leaves_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let bytes = build_zip(&[
            ("edition/ok.csv", b"fine"),
            ("../../escape.csv", b"evil"),
        ]);

        let err = extract_archive(&bytes, temp_dir.path(), "edition.zip", "edition").unwrap_err();
        assert!(matches!(err, GeoError::Archive { .. }));
        assert!(staging_entries(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_rejects_non_zip_bytes() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let err =
            extract_archive(b"not a zip", temp_dir.path(), "edition.zip", "edition").unwrap_err();
        assert!(matches!(err, GeoError::Archive { .. }));
        assert!(staging_entries(temp_dir.path()).is_empty());
    }
}
