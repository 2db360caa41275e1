//! Remote acquisition of GeoLite2 CSV editions.
//!
//! Each edition costs two GETs against the MaxMind download endpoint: the
//! `zip.sha256` manifest, then the `zip` archive. The archive is verified
//! against the manifest before anything touches the staging directory.

mod extract;
mod manifest;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use url::form_urlencoded;

use crate::config::{Config, MAXMIND_LICENSE_KEY_ENV, MAX_MANIFEST_SIZE};
use crate::error_handling::GeoError;
use crate::geolite2::DatasetKind;

use extract::extract_archive;
use manifest::{parse_manifest, verify_archive};

/// Downloads, verifies and extracts GeoLite2 CSV editions.
///
/// Requests are never retried; a failure surfaces immediately.
#[derive(Clone)]
pub struct RemoteFetcher {
    client: Arc<reqwest::Client>,
    download_base: String,
    license_key: String,
    staging_dir: PathBuf,
    max_download_size: u64,
}

impl RemoteFetcher {
    /// Builds a fetcher from `config`, which must carry a license key.
    ///
    /// The client's own timeout is the per-request deadline; see
    /// [`crate::initialization::init_client`].
    pub fn new(config: &Config, client: Arc<reqwest::Client>) -> Result<Self, GeoError> {
        let license_key = config
            .license_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GeoError::MissingLicenseKey(MAXMIND_LICENSE_KEY_ENV))?;

        Ok(Self {
            client,
            download_base: config.download_base.clone(),
            license_key,
            staging_dir: config.staging_dir.clone(),
            max_download_size: config.max_download_size,
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Fetches one edition and returns its extracted directory,
    /// `<staging>/<archive name without .zip>`.
    pub async fn fetch(&self, kind: DatasetKind) -> Result<PathBuf, GeoError> {
        let edition = kind.edition_id();
        info!("Fetching {} from {}", edition, self.download_base);

        let manifest_bytes = self
            .download_with_size_limit(edition, "zip.sha256", MAX_MANIFEST_SIZE)
            .await?;
        let manifest = parse_manifest(edition, &String::from_utf8_lossy(&manifest_bytes))?;
        debug!("{} manifest: {} {}", edition, manifest.digest, manifest.file_name);

        let archive = self
            .download_with_size_limit(edition, "zip", self.max_download_size)
            .await?;
        verify_archive(&manifest, &archive)?;
        info!(
            "Verified {} ({} bytes, sha256 {})",
            manifest.file_name,
            archive.len(),
            manifest.digest
        );

        tokio::fs::create_dir_all(&self.staging_dir).await?;
        let dir = extract_archive(
            &archive,
            &self.staging_dir,
            &manifest.file_name,
            manifest.stem(),
        )?;
        info!("Extracted {} to {}", edition, dir.display());
        Ok(dir)
    }

    fn request_url(&self, edition: &str, suffix: &str) -> String {
        let encoded_key =
            form_urlencoded::byte_serialize(self.license_key.as_bytes()).collect::<String>();
        format!(
            "{}?edition_id={}&license_key={}&suffix={}",
            self.download_base, edition, encoded_key, suffix
        )
    }

    /// Same URL without the license key, for logs and errors.
    fn display_url(&self, edition: &str, suffix: &str) -> String {
        format!(
            "{}?edition_id={}&suffix={}",
            self.download_base, edition, suffix
        )
    }

    async fn download_with_size_limit(
        &self,
        edition: &str,
        suffix: &str,
        max_size: u64,
    ) -> Result<Vec<u8>, GeoError> {
        let shown = self.display_url(edition, suffix);
        debug!("GET {}", shown);

        let response = self
            .client
            .get(self.request_url(edition, suffix))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            log::error!("MaxMind download of {} answered {}", shown, status);
            return Err(GeoError::HttpStatus { url: shown, status });
        }

        // Check content-length header if available
        if let Some(content_length) = response.content_length() {
            if content_length > max_size {
                return Err(GeoError::DownloadTooLarge {
                    url: shown,
                    size: content_length,
                    max: max_size,
                });
            }
        }

        let bytes = response.bytes().await?.to_vec();

        // Content-length may be missing or wrong
        if bytes.len() as u64 > max_size {
            return Err(GeoError::DownloadTooLarge {
                url: shown,
                size: bytes.len() as u64,
                max: max_size,
            });
        }

        Ok(bytes)
    }
}
