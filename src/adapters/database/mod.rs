pub mod honeypot_log_repo;

use crate::config::DatabaseConfig;
use backon::{ExponentialBuilder, Retryable};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

/// Initializes the database connection pool, retrying the first connection with
/// exponential backoff.
///
/// # Errors
/// Returns `sqlx::Error` if every attempt fails.
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    let retry_strategy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(config.min_backoff_secs))
        .with_max_delay(Duration::from_secs(config.max_backoff_secs))
        .with_max_times(config.connect_attempts);

    (|| {
        let options = options.clone();
        let url = config.url.clone();
        async move { options.connect(&url).await }
    })
        .retry(retry_strategy)
        .notify(|e: &sqlx::Error, delay: Duration| {
            tracing::warn!(error = %e, retry_in_ms = delay.as_millis(), "Database not reachable, retrying...");
        })
        .await
}

/// Applies the embedded migrations.
///
/// # Errors
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
