//! Image upload endpoints.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use realty_common::pinning::{ImageUpload, PinMetadata, PinningClient};
use realty_common::{AppError, AppResult};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::extractors::AdminSession;

/// `POST /upload`
///
/// Multipart form: repeated `files` parts plus optional `propertyId`,
/// `companyId` and `description` text fields. Every file is validated
/// before any of them is sent out, so a bad file in the batch is a 400 and
/// nothing gets pinned. Partial remote failure is a 207 with per-file
/// outcomes.
pub async fn upload(
    _admin: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut files = Vec::new();
    let mut metadata = PinMetadata::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                files.push(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "name" => {
                metadata.name = read_text(field).await?;
            }
            "description" => {
                metadata.description = read_text(field).await?;
            }
            "propertyId" => {
                metadata.property_id = read_text(field).await?;
            }
            "companyId" => {
                metadata.company_id = read_text(field).await?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()));
    }

    for file in &files {
        PinningClient::validate(file).map_err(|e| AppError::BadRequest(e.to_string()))?;
    }

    let report = state.media.upload_images(files, metadata).await;

    if report.all_failed() {
        return Err(AppError::ExternalService(
            "All uploads were refused by the pinning service".to_string(),
        ));
    }

    let status = if report.is_partial() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    Ok((status, Json(report)).into_response())
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<String>> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Query for asset removal.
#[derive(Debug, Deserialize)]
pub struct RemoveAssetQuery {
    /// Content hash of the pinned asset.
    pub hash: Option<String>,
}

/// `DELETE /upload?hash=...`
pub async fn remove(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<RemoveAssetQuery>,
) -> AppResult<Json<Value>> {
    let hash = query
        .hash
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::BadRequest("hash query parameter is required".to_string()))?;

    state.media.delete_asset(&hash).await?;

    Ok(Json(json!({ "success": true })))
}
