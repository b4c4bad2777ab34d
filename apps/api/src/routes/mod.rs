pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::users::handlers;
use crate::view::handlers::{handle_email_form, handle_index};
use crate::view::page::EMAIL_FORM_ACTION;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handle_index))
        .route(EMAIL_FORM_ACTION, post(handle_email_form))
        .route(
            "/api/users",
            get(handlers::handle_list_users).put(handlers::handle_update_email),
        )
        .with_state(state)
}
