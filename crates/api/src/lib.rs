//! HTTP API for realty-rs.

pub mod endpoints;
pub mod extractors;
pub mod middleware;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use realty_core::{CompanyService, MediaService, PropertyService, SessionService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Company operations.
    pub companies: CompanyService,
    /// Property operations.
    pub properties: PropertyService,
    /// Asset uploads and removal.
    pub media: MediaService,
    /// Admin session issuing and verification.
    pub sessions: SessionService,
}

/// Build the full API router.
///
/// Session detection runs on every request; authorization itself happens in
/// the [`extractors::AdminSession`] extractor on mutation handlers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/companies",
            get(endpoints::companies::list).post(endpoints::companies::create),
        )
        .route(
            "/companies/{id}",
            get(endpoints::companies::show)
                .put(endpoints::companies::update)
                .delete(endpoints::companies::remove),
        )
        .route(
            "/companies/{id}/recount",
            post(endpoints::companies::recount),
        )
        .route(
            "/properties",
            get(endpoints::properties::list).post(endpoints::properties::create),
        )
        .route(
            "/properties/{id}",
            get(endpoints::properties::show)
                .put(endpoints::properties::update)
                .delete(endpoints::properties::remove),
        )
        .route(
            "/upload",
            post(endpoints::upload::upload).delete(endpoints::upload::remove),
        )
        .route("/admin/login", post(endpoints::admin::login))
        .route("/admin/session", get(endpoints::admin::session))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::attach_admin_session,
        ))
        .with_state(state)
}
