//! PostgreSQL connection management for the deposit store.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared connection pool handle.
///
/// The gateway health endpoint and the deposit store both borrow the pool
/// from here; nothing else in the crate talks to PostgreSQL directly.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect with the default pool size.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect_with(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size (config-driven).
    pub async fn connect_with(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// One cheap round-trip to verify the database answers.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
