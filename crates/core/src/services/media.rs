//! Media service.
//!
//! Front door to the pinning client: batch uploads with per-file outcomes
//! and unpinning that also drops the tracking row, if one exists.

use std::sync::Arc;

use realty_common::pinning::{ImageUpload, PinMetadata, PinningClient, UploadError};
use realty_common::{AppError, AppResult};
use realty_db::repositories::PropertyImageRepository;
use serde::Serialize;

/// A file that was pinned successfully.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub url: String,
    pub hash: String,
}

/// A file that was refused or failed to pin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a batch upload, one entry per input file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedImage>,
    pub failed: Vec<FailedUpload>,
}

impl UploadReport {
    /// Some files pinned, some did not.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.uploaded.is_empty() && !self.failed.is_empty()
    }

    /// Nothing pinned at all.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.uploaded.is_empty() && !self.failed.is_empty()
    }
}

/// Service for image asset uploads and removal.
#[derive(Clone)]
pub struct MediaService {
    pinning: PinningClient,
    images: Arc<PropertyImageRepository>,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub const fn new(pinning: PinningClient, images: Arc<PropertyImageRepository>) -> Self {
        Self { pinning, images }
    }

    /// Pin a batch of images, reporting per-file outcomes.
    ///
    /// One bad file never sinks the batch; the caller decides what a partial
    /// result means for its response status.
    pub async fn upload_images(
        &self,
        files: Vec<ImageUpload>,
        metadata: PinMetadata,
    ) -> UploadReport {
        let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        let outcomes = self.pinning.upload_many(files, &metadata).await;

        let mut report = UploadReport::default();
        for (file_name, outcome) in names.into_iter().zip(outcomes) {
            match outcome {
                Ok(asset) => report.uploaded.push(UploadedImage {
                    file_name,
                    url: asset.url,
                    hash: asset.hash,
                }),
                Err(error) => {
                    tracing::warn!(file = %file_name, error = %error, "Image upload failed");
                    report.failed.push(FailedUpload {
                        file_name,
                        error: error.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Upload batch finished"
        );

        report
    }

    /// Unpin an asset by content hash and remove its tracking row.
    ///
    /// Hashes referenced only from company logo or cover fields have no
    /// tracking row; for those only the unpin happens.
    pub async fn delete_asset(&self, hash: &str) -> AppResult<()> {
        self.pinning.delete(hash).await.map_err(upload_error_to_app)?;

        if let Some(image) = self.images.find_by_pin_hash(hash).await? {
            self.images.delete(&image.id).await?;
            tracing::info!(hash = %hash, image_id = %image.id, "Unpinned asset and removed image row");
        } else {
            tracing::info!(hash = %hash, "Unpinned untracked asset");
        }

        Ok(())
    }
}

fn upload_error_to_app(error: UploadError) -> AppError {
    match error {
        UploadError::NotConfigured => {
            AppError::Config("Pinning service credentials not configured".to_string())
        }
        UploadError::InvalidType(_) | UploadError::TooLarge(_) => {
            AppError::BadRequest(error.to_string())
        }
        UploadError::Remote(_) => AppError::ExternalService(error.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use realty_common::config::PinningConfig;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn unconfigured_service() -> MediaService {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        MediaService::new(
            PinningClient::new(PinningConfig::default()),
            Arc::new(PropertyImageRepository::new(db)),
        )
    }

    fn file(name: &str, content_type: &str, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![0u8; size],
        }
    }

    #[tokio::test]
    async fn test_upload_reports_per_file_failures() {
        let media = unconfigured_service();

        let report = media
            .upload_images(
                vec![
                    file("a.gif", "image/gif", 128),
                    file("b.jpg", "image/jpeg", 15 * 1024 * 1024),
                ],
                PinMetadata::default(),
            )
            .await;

        assert!(report.uploaded.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].file_name, "a.gif");
        assert!(report.failed[0].error.contains("Invalid file type"));
        assert!(report.failed[1].error.contains("too large"));
        assert!(report.all_failed());
        assert!(!report.is_partial());
    }

    #[tokio::test]
    async fn test_delete_asset_without_credentials_is_config_error() {
        let media = unconfigured_service();
        let result = media.delete_asset("QmHash").await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_report_partial_flag() {
        let report = UploadReport {
            uploaded: vec![UploadedImage {
                file_name: "a.jpg".to_string(),
                url: "https://gateway.example/Qm1".to_string(),
                hash: "Qm1".to_string(),
            }],
            failed: vec![FailedUpload {
                file_name: "b.gif".to_string(),
                error: "Invalid file type".to_string(),
            }],
        };
        assert!(report.is_partial());
        assert!(!report.all_failed());
    }
}
