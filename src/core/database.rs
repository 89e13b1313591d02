use crate::core::error::AppError;
use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Apply the embedded schema migrations (tables, unique indexes, seeded lots).
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Log a failed statement and convert it into an `AppError`.
///
/// Unique violations are logged at debug level: several callers expect them
/// (lazy materialization, check-in) and turn the resulting `Conflict` into a
/// normal outcome.
pub fn db_error(context: &str, e: sqlx::Error) -> AppError {
    let err = AppError::from(e);
    if err.is_conflict() {
        tracing::debug!("{}: {}", context, err);
    } else {
        tracing::error!("{}: {:?}", context, err);
    }
    err
}
