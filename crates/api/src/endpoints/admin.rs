//! Admin session endpoints.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use realty_common::AppResult;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::middleware::ADMIN_COOKIE;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin password.
    pub password: String,
}

/// `POST /admin/login`
///
/// On success sets the session cookie: HttpOnly, Secure, SameSite=Strict,
/// lifetime matching the token's validity window.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<Value>)> {
    let token = state.sessions.login(&request.password)?;

    tracing::info!("Admin login succeeded");

    let cookie = Cookie::build((ADMIN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(state.sessions.session_ttl_hours()))
        .build();

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// `GET /admin/session`
///
/// Session probe for the back office; never errors.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Json<Value> {
    let authenticated = jar
        .get(ADMIN_COOKIE)
        .is_some_and(|cookie| state.sessions.verify(cookie.value()));

    Json(json!({ "authenticated": authenticated }))
}
