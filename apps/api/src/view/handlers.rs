use std::collections::VecDeque;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    response::Html,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::users::pagination::{PageQuery, PageRequest};
use crate::users::service::{self, EmailUpdate, INVALID_UPDATE_MESSAGE};
use crate::view::controller::{Effect, Event, PagerController};
use crate::view::page::render_users_page;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(flatten)]
    pub paging: PageQuery,
    /// Id of the user whose email is being edited.
    pub edit: Option<String>,
}

/// Submitted by the inline edit form. `current` is the email the edit started from.
#[derive(Debug, Deserialize)]
pub struct EmailForm {
    pub id: String,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub paging: PageQuery,
}

/// GET /?page=&pageSize=&edit=
pub async fn handle_index(
    State(state): State<AppState>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let req = PageRequest::from_query(&query.paging);
    let page = service::list_users(state.store.as_ref(), req).await?;

    let mut controller = PagerController::at(req);
    controller.handle(Event::Loaded { pages: page.pages });

    let editing = query
        .edit
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
        .and_then(|id| page.users.iter().find(|u| u.id == id));
    if let Some(user) = editing {
        controller.handle(Event::BeginEdit {
            id: user.id,
            email: user.email.clone(),
        });
    }

    Ok(Html(render_users_page(&page, &controller, None)))
}

/// POST /users/email
///
/// Replays the edit through the controller, carries out its effects and
/// renders the re-fetched listing with the outcome notice.
pub async fn handle_email_form(
    State(state): State<AppState>,
    form: Result<Form<EmailForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|e| {
        warn!("Rejected email form: {e}");
        AppError::InvalidArgument(INVALID_UPDATE_MESSAGE.to_string())
    })?;
    let store = state.store.as_ref();
    let mut controller = PagerController::at(PageRequest::from_query(&form.paging));

    let effects = match Uuid::parse_str(&form.id) {
        Ok(id) => {
            controller.handle(Event::BeginEdit {
                id,
                email: form.current,
            });
            controller.handle(Event::EditDraft(form.email));
            controller.handle(Event::CommitEdit)
        }
        Err(_) => controller.handle(Event::UpdateFailed(format!("User {} not found", form.id))),
    };

    let mut pending = VecDeque::from(effects);
    let mut fetch = None;
    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::Update { id, email } => {
                let update = EmailUpdate {
                    id: id.to_string(),
                    email,
                };
                let outcome = match service::apply_email_update(store, update).await {
                    Ok(_) => Event::UpdateSucceeded,
                    Err(e) => {
                        warn!("Email update for user {id} failed: {e}");
                        Event::UpdateFailed(e.to_string())
                    }
                };
                pending.extend(controller.handle(outcome));
            }
            // Nothing is cached server-side; the fetch below reads the store again.
            Effect::Invalidate => {}
            Effect::Fetch(req) => fetch = Some(req),
        }
    }

    let page = service::list_users(store, fetch.unwrap_or_else(|| controller.request())).await?;
    controller.handle(Event::Loaded { pages: page.pages });

    Ok(Html(render_users_page(
        &page,
        &controller,
        controller.notice(),
    )))
}
