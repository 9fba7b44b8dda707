//! Shared PostgreSQL pool for every server function and the session store.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// The process-wide pool, connected on first use from `DATABASE_URL`.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(connect).await
}

async fn connect() -> Result<PgPool, sqlx::Error> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL is not set".into()))?;

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&url)
        .await?;
    tracing::info!(max_connections = MAX_CONNECTIONS, "lead store connected");
    Ok(pool)
}
