//! User record store — trait-based so the services never see the backend.
//!
//! `AppState` holds an `Arc<dyn UserStore>`. Production uses `PgUserStore`;
//! tests use the in-memory store in `users::memory`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::LazyPool;
use crate::errors::AppError;
use crate::models::user::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Total number of users, independent of any page.
    async fn count(&self) -> Result<i64, AppError>;

    /// Users ordered by `(created_at, id)`, skipping `offset`, at most `limit`.
    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Sets `email` on one user and returns the record as stored afterwards.
    /// `Ok(None)` when no user has this id.
    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<User>, AppError>;

    /// Checks the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct PgUserStore {
    pool: LazyPool,
}

impl PgUserStore {
    pub fn new(pool: LazyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn count(&self) -> Result<i64, AppError> {
        let pool = self.pool.get().await?;
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let pool = self.pool.get().await?;
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, avatar, created_at, updated_at
            FROM users
            ORDER BY created_at ASC, id ASC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?)
    }

    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<User>, AppError> {
        let pool = self.pool.get().await?;
        // Single atomic statement; concurrent writers are last-write-wins.
        Ok(sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, name, email, avatar, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(id)
        .fetch_optional(pool)
        .await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.pool.ping().await?)
    }
}
