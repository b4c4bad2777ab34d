use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Process-wide PostgreSQL pool that is connected on first use.
///
/// Concurrent callers share a single connection attempt. A failed attempt
/// leaves the cell empty, so the next request tries again instead of the
/// process giving up.
pub struct LazyPool {
    database_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    cell: OnceCell<PgPool>,
}

impl LazyPool {
    pub fn new(database_url: String, max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            database_url,
            max_connections,
            acquire_timeout,
            cell: OnceCell::new(),
        }
    }

    /// Returns the shared pool, connecting first if no pool exists yet.
    pub async fn get(&self) -> Result<&PgPool, sqlx::Error> {
        self.cell
            .get_or_try_init(|| async {
                let result = create_pool(
                    &self.database_url,
                    self.max_connections,
                    self.acquire_timeout,
                )
                .await;
                if let Err(e) = &result {
                    warn!("PostgreSQL connection failed, will retry on next request: {e}");
                }
                result
            })
            .await
    }

    /// Connects (if needed) and runs a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let pool = self.get().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
