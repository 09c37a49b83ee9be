//! PostgreSQL pool setup and persistence queries.
//!
//! The database is optional: without `DATABASE_URL` the API runs purely
//! in-memory, which is how the demo deploys. With a pool, every mutation
//! writes through and startup hydrates the in-memory store from the
//! `registrations` table.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod registrations;

/// Connect to PostgreSQL and run pending migrations.
///
/// Returns `None` when no URL is configured, logging that the API is in
/// in-memory mode.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set; running with in-memory state only");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Connected to PostgreSQL and applied migrations");
    Ok(Some(pool))
}
