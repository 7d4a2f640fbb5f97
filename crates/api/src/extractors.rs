//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use realty_common::AppError;

/// Marker proving the request carries a valid admin session.
///
/// Inserted by [`crate::middleware::attach_admin_session`]; requesting it
/// in a handler turns a missing or invalid session into a 401 before the
/// handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}
