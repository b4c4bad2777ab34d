use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::pagination::{PageQuery, PageRequest, UserPage};
use crate::users::service::{self, INVALID_UPDATE_MESSAGE};

#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub user: User,
}

/// Unparseable query strings fall back to the default page.
pub fn page_request(query: Result<Query<PageQuery>, QueryRejection>) -> PageRequest {
    query
        .map(|Query(q)| PageRequest::from_query(&q))
        .unwrap_or_default()
}

/// GET /api/users?page=&pageSize=
pub async fn handle_list_users(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<UserPage>, AppError> {
    let page = service::list_users(state.store.as_ref(), page_request(query)).await?;
    Ok(Json(page))
}

/// PUT /api/users
pub async fn handle_update_email(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    let Json(body) = body.map_err(|e| {
        warn!("Rejected update body: {e}");
        AppError::InvalidArgument(INVALID_UPDATE_MESSAGE.to_string())
    })?;
    let user = service::update_email(state.store.as_ref(), &body).await?;
    Ok(Json(UpdateUserResponse { user }))
}
