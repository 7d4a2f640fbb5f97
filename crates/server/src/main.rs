//! realty-rs server binary.

use std::sync::Arc;

use anyhow::Context;
use realty_api::AppState;
use realty_common::pinning::PinningClient;
use realty_common::{Config, IdGenerator};
use realty_core::{CompanyService, MediaService, PropertyService, SessionService};
use realty_db::repositories::{CompanyRepository, PropertyImageRepository, PropertyRepository};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// Multipart batches of up to ten 10 MB images, plus form overhead.
const MAX_BODY_SIZE: usize = 110 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,realty=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting realty server"
    );

    let db = realty_db::init(&config)
        .await
        .context("Failed to connect to database")?;

    realty_db::migrate(&db)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Database ready");

    let db = Arc::new(db);
    let companies_repo = Arc::new(CompanyRepository::new(db.clone()));
    let properties_repo = Arc::new(PropertyRepository::new(db.clone()));
    let images_repo = Arc::new(PropertyImageRepository::new(db));

    let id_gen = IdGenerator::new();
    let pinning = PinningClient::new(config.pinning.clone());

    let state = AppState {
        companies: CompanyService::new(companies_repo.clone(), id_gen.clone()),
        properties: PropertyService::new(properties_repo, companies_repo, id_gen),
        media: MediaService::new(pinning, images_repo),
        sessions: SessionService::new(config.auth.clone()),
    };

    let app = realty_api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
