use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::users::pagination::{page_count, PageRequest, UserPage};
use crate::users::store::UserStore;

pub const INVALID_UPDATE_MESSAGE: &str = "ID or email is invalid";

/// Returns one page of users with the total count and page count.
/// A page past the end is an empty slice, not an error.
pub async fn list_users(store: &dyn UserStore, req: PageRequest) -> Result<UserPage, AppError> {
    let count = store.count().await?;
    let users = store.find_page(req.offset(), req.limit()).await?;

    Ok(UserPage {
        users,
        page: req.page,
        page_size: req.page_size,
        count,
        pages: page_count(count, req.page_size),
    })
}

/// Validated `{ id, email }` payload of an email update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailUpdate {
    pub id: String,
    pub email: String,
}

impl EmailUpdate {
    /// Both fields must be present, strings and non-empty.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let field = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (field("id"), field("email")) {
            (Some(id), Some(email)) => Ok(Self { id, email }),
            _ => Err(AppError::InvalidArgument(INVALID_UPDATE_MESSAGE.to_string())),
        }
    }
}

/// Changes only the email of one user and returns the updated record.
pub async fn update_email(store: &dyn UserStore, body: &Value) -> Result<User, AppError> {
    apply_email_update(store, EmailUpdate::from_json(body)?).await
}

/// Writes an already validated update. An id that is not a UUID cannot
/// match any record and is reported as not found without a store call.
pub async fn apply_email_update(
    store: &dyn UserStore,
    update: EmailUpdate,
) -> Result<User, AppError> {
    let EmailUpdate { id, email } = update;
    if id.is_empty() || email.is_empty() {
        return Err(AppError::InvalidArgument(INVALID_UPDATE_MESSAGE.to_string()));
    }

    let not_found = || AppError::NotFound(format!("User {id} not found"));
    let user_id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let user = store
        .update_email(user_id, &email)
        .await?
        .ok_or_else(not_found)?;

    info!("Updated email for user {user_id}");
    Ok(user)
}
