//! Company endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use realty_common::AppResult;
use realty_core::{Company, CreateCompanyInput, UpdateCompanyInput};
use serde_json::{Value, json};

use crate::AppState;
use crate::extractors::AdminSession;

/// `GET /companies`
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Company>>> {
    Ok(Json(state.companies.list().await?))
}

/// `GET /companies/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Company>> {
    Ok(Json(state.companies.get(&id).await?))
}

/// `POST /companies`
pub async fn create(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateCompanyInput>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let company = state.companies.create(input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// `PUT /companies/{id}`
pub async fn update(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCompanyInput>,
) -> AppResult<Json<Company>> {
    Ok(Json(state.companies.update(&id, input).await?))
}

/// `DELETE /companies/{id}`
///
/// Cascades through properties and images; responds with the deleted
/// record's last state.
pub async fn remove(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Company>> {
    Ok(Json(state.companies.delete(&id).await?))
}

/// `POST /companies/{id}/recount`
///
/// Maintenance endpoint reconciling the denormalized properties count.
pub async fn recount(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let count = state.companies.recount_properties(&id).await?;
    Ok(Json(json!({ "propertiesCount": count })))
}
