//! Request middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::AppState;
use crate::extractors::AdminSession;

/// Name of the session cookie.
pub const ADMIN_COOKIE: &str = "admin-token";

/// Attach an [`AdminSession`] marker when the request carries a valid
/// session cookie.
///
/// Never rejects by itself; handlers that require authorization do so
/// through the extractor.
pub async fn attach_admin_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(ADMIN_COOKIE) {
        if state.sessions.verify(cookie.value()) {
            request.extensions_mut().insert(AdminSession);
        }
    }

    next.run(request).await
}
