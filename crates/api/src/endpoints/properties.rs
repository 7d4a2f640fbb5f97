//! Property endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use realty_common::AppResult;
use realty_core::{CreatePropertyInput, Property, UpdatePropertyInput};

use crate::AppState;
use crate::extractors::AdminSession;

/// `GET /properties`
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(state.properties.list().await?))
}

/// `GET /properties/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Property>> {
    Ok(Json(state.properties.get(&id).await?))
}

/// `POST /properties`
pub async fn create(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreatePropertyInput>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = state.properties.create(input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// `PUT /properties/{id}`
pub async fn update(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePropertyInput>,
) -> AppResult<Json<Property>> {
    Ok(Json(state.properties.update(&id, input).await?))
}

/// `DELETE /properties/{id}`
pub async fn remove(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Property>> {
    Ok(Json(state.properties.delete(&id).await?))
}
