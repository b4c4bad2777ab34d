use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::users::store::UserStore;

/// In-memory `UserStore` for tests. Keeps users in `(created_at, id)` order.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    failing: AtomicBool,
    update_calls: AtomicUsize,
}

impl MemoryUserStore {
    pub fn with_users(mut users: Vec<User>) -> Self {
        users.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    /// `n` users created one minute apart, named `user-0`, `user-1`, ...
    pub fn seeded(n: usize) -> Self {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let users = (0..n)
            .map(|i| {
                let at = base + Duration::minutes(i as i64);
                User {
                    id: Uuid::new_v4(),
                    name: format!("user-{i}"),
                    email: format!("user-{i}@example.com"),
                    avatar: Some(format!("https://example.com/avatars/{i}.png")),
                    created_at: at,
                    updated_at: at,
                }
            })
            .collect();
        Self::with_users(users)
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Store("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(users.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.email = email.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}
