//! # udyam-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Udyam registration API.
//! Binds to a configurable port (default 8080).

use udyam_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "starting udyam-api");

    // Optional PostgreSQL pool; absent means in-memory only.
    let db_pool = udyam_api::db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let port = config.port;
    let state = AppState::with_config(config, db_pool);
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Hydration from database failed: {e}");
        e
    })?;

    let app = udyam_api::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Udyam Registration API listening on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}
