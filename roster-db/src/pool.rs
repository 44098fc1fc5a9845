//! Connection pool built from the `[database]` config section
//!
//! Stores borrow the pool; each store call checks out one connection and
//! returns it when the statement finishes.

use std::time::Duration;

use roster_core::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crate::DbError;

/// Pool settings for a `[database]` section.
///
/// A `max_connections` of zero would leave every store call waiting
/// forever, so it is raised to one.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}

/// Connect with the default `[database]` settings.
pub async fn create_pool(database_url: &str) -> Result<PgPool, DbError> {
    create_pool_with_options(database_url, &DatabaseConfig::default()).await
}

/// Connect using the limits from `config`. The URL is passed separately
/// because it may come from `DATABASE_URL` rather than the file.
pub async fn create_pool_with_options(
    database_url: &str,
    config: &DatabaseConfig,
) -> Result<PgPool, DbError> {
    let pool = pool_options(config).connect(database_url).await?;
    debug!(
        max_connections = pool.options().get_max_connections(),
        "Connected to roster database"
    );
    Ok(pool)
}
