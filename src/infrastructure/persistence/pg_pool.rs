use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument, warn};

use crate::application::ports::UsageLogError;

const CONNECT_ATTEMPTS: u32 = 6;
const FIRST_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Connects to Postgres, backing off between attempts while the server comes up.
#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, UsageLogError> {
    let options = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10));

    let mut backoff = FIRST_BACKOFF;
    let mut attempt = 1;
    loop {
        let error = match options.clone().connect(url).await {
            Ok(pool) => {
                info!(attempt, "Usage database connected");
                return Ok(pool);
            }
            Err(e) => e,
        };

        if attempt == CONNECT_ATTEMPTS {
            return Err(UsageLogError::ConnectionFailed(error.to_string()));
        }

        warn!(
            error = %error,
            attempt,
            backoff_ms = backoff.as_millis() as u64,
            "Usage database unreachable"
        );
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
        attempt += 1;
    }
}

/// Applies the embedded `migrations/` directory.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), UsageLogError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| UsageLogError::ConnectionFailed(format!("migration failed: {e}")))?;
    info!("Usage database schema is current");
    Ok(())
}
