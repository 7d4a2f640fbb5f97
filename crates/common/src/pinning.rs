//! Client for the content-addressed image pinning service.
//!
//! Uploads go to a Pinata-style pinning API and come back as a stable
//! content hash plus a gateway retrieval URL. The client holds no local
//! state; expected failures (bad file type, oversized file, missing
//! credentials, remote refusal) are reported as [`UploadError`] values
//! rather than surfacing through [`crate::AppError`].

use futures::future::join_all;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::PinningConfig;

/// Maximum accepted image size (10 MB).
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// A file handed to the pinning client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

/// Descriptive metadata attached to a pinned file.
#[derive(Debug, Clone, Default)]
pub struct PinMetadata {
    /// Display name for the pinned object.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Owning property ID, if any.
    pub property_id: Option<String>,
    /// Owning company ID, if any.
    pub company_id: Option<String>,
}

/// A successfully pinned asset.
#[derive(Debug, Clone, Serialize)]
pub struct PinnedAsset {
    /// Gateway URL the asset can be retrieved from.
    pub url: String,
    /// Content hash identifying the asset in the pinning service.
    pub hash: String,
}

/// Why an upload or unpin was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid file type: {0}. Only JPEG, PNG, and WebP images are allowed")]
    InvalidType(String),

    #[error("File too large: {0} bytes. Maximum size is 10MB per file")]
    TooLarge(usize),

    #[error("Pinning service credentials not configured")]
    NotConfigured,

    #[error("Pinning service error: {0}")]
    Remote(String),
}

/// Per-file upload result.
pub type UploadOutcome = Result<PinnedAsset, UploadError>;

#[derive(Debug, Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for the remote pinning service.
#[derive(Debug, Clone)]
pub struct PinningClient {
    http: reqwest::Client,
    config: PinningConfig,
}

impl PinningClient {
    /// Create a new pinning client.
    #[must_use]
    pub fn new(config: PinningConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Validate a file against the MIME allow-list and size ceiling.
    ///
    /// Runs before any network traffic so rejected files never reach the
    /// remote store.
    pub fn validate(upload: &ImageUpload) -> Result<(), UploadError> {
        if !ALLOWED_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
            return Err(UploadError::InvalidType(upload.content_type.clone()));
        }
        if upload.data.len() > MAX_IMAGE_SIZE {
            return Err(UploadError::TooLarge(upload.data.len()));
        }
        Ok(())
    }

    fn credentials(&self) -> Result<(&str, &str), UploadError> {
        match (&self.config.api_key, &self.config.secret_api_key) {
            (Some(key), Some(secret)) => Ok((key, secret)),
            _ => Err(UploadError::NotConfigured),
        }
    }

    /// Build the gateway retrieval URL for a content hash.
    #[must_use]
    pub fn gateway_url(&self, hash: &str) -> String {
        format!("{}/{}", self.config.gateway_url.trim_end_matches('/'), hash)
    }

    /// Upload a single file to the pinning service.
    pub async fn upload(&self, upload: ImageUpload, metadata: &PinMetadata) -> UploadOutcome {
        Self::validate(&upload)?;
        let (api_key, secret) = self.credentials()?;

        let pin_metadata = json!({
            "name": metadata
                .name
                .clone()
                .unwrap_or_else(|| format!("image-{}", chrono::Utc::now().timestamp_millis())),
            "keyvalues": {
                "description": metadata.description.clone().unwrap_or_default(),
                "propertyId": metadata.property_id.clone().unwrap_or_default(),
                "companyId": metadata.company_id.clone().unwrap_or_default(),
                "uploadedAt": chrono::Utc::now().to_rfc3339(),
            },
        });

        let file_part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| UploadError::Remote(e.to_string()))?;

        let form = Form::new()
            .part("file", file_part)
            .text("pinataMetadata", pin_metadata.to_string())
            .text("pinataOptions", json!({ "cidVersion": 0 }).to_string());

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.config.api_url))
            .header("pinata_api_key", api_key)
            .header("pinata_secret_api_key", secret)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Remote(format!("upload failed: {body}")));
        }

        let pinned: PinFileResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Remote(e.to_string()))?;

        Ok(PinnedAsset {
            url: self.gateway_url(&pinned.ipfs_hash),
            hash: pinned.ipfs_hash,
        })
    }

    /// Upload multiple files concurrently.
    ///
    /// Results come back one per input, in input order; a mix of successes
    /// and failures is possible and it is the caller's job to decide what a
    /// partial failure means.
    pub async fn upload_many(
        &self,
        uploads: Vec<ImageUpload>,
        metadata: &PinMetadata,
    ) -> Vec<UploadOutcome> {
        let futures = uploads.into_iter().enumerate().map(|(i, upload)| {
            let per_file = PinMetadata {
                name: Some(format!(
                    "{}-{}",
                    metadata.property_id.as_deref().unwrap_or("image"),
                    i + 1
                )),
                description: Some(format!("Image {}", i + 1)),
                property_id: metadata.property_id.clone(),
                company_id: metadata.company_id.clone(),
            };
            async move { self.upload(upload, &per_file).await }
        });

        join_all(futures).await
    }

    /// Unpin an asset by its content hash.
    ///
    /// The client holds no local state, so this is idempotent from the
    /// caller's perspective; unpinning an unknown hash surfaces as
    /// [`UploadError::Remote`].
    pub async fn delete(&self, hash: &str) -> Result<(), UploadError> {
        let (api_key, secret) = self.credentials()?;

        let response = self
            .http
            .delete(format!("{}/pinning/unpin/{hash}", self.config.api_url))
            .header("pinata_api_key", api_key)
            .header("pinata_secret_api_key", secret)
            .send()
            .await
            .map_err(|e| UploadError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Remote(format!("unpin failed: {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jpeg(size: usize) -> ImageUpload {
        ImageUpload {
            file_name: "photo.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0u8; size],
        }
    }

    #[test]
    fn test_validate_accepts_allowed_types() {
        for content_type in ALLOWED_IMAGE_TYPES {
            let upload = ImageUpload {
                file_name: "f".to_string(),
                content_type: (*content_type).to_string(),
                data: vec![0u8; 128],
            };
            assert!(PinningClient::validate(&upload).is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_disallowed_type() {
        let upload = ImageUpload {
            file_name: "f.gif".to_string(),
            content_type: "image/gif".to_string(),
            data: vec![0u8; 128],
        };
        assert_eq!(
            PinningClient::validate(&upload),
            Err(UploadError::InvalidType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        // 15 MB JPEG must be refused before any network traffic
        let upload = jpeg(15 * 1024 * 1024);
        assert_eq!(
            PinningClient::validate(&upload),
            Err(UploadError::TooLarge(15 * 1024 * 1024))
        );
    }

    #[test]
    fn test_validate_accepts_file_at_size_ceiling() {
        assert!(PinningClient::validate(&jpeg(MAX_IMAGE_SIZE)).is_ok());
    }

    #[tokio::test]
    async fn test_upload_without_credentials_is_not_configured() {
        let client = PinningClient::new(PinningConfig::default());
        let result = client.upload(jpeg(128), &PinMetadata::default()).await;
        assert_eq!(result.unwrap_err(), UploadError::NotConfigured);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_credential_check() {
        // No credentials configured, but the size check fires first: the
        // file would be refused even on a configured client, with no I/O.
        let client = PinningClient::new(PinningConfig::default());
        let result = client
            .upload(jpeg(MAX_IMAGE_SIZE + 1), &PinMetadata::default())
            .await;
        assert!(matches!(result.unwrap_err(), UploadError::TooLarge(_)));
    }

    #[tokio::test]
    async fn test_delete_without_credentials_is_not_configured() {
        let client = PinningClient::new(PinningConfig::default());
        let result = client.delete("QmHash").await;
        assert_eq!(result.unwrap_err(), UploadError::NotConfigured);
    }

    #[test]
    fn test_gateway_url() {
        let client = PinningClient::new(PinningConfig::default());
        assert_eq!(
            client.gateway_url("QmHash"),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }
}
