use std::sync::Arc;

use crate::users::store::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store. Default: `PgUserStore` over a lazily connected pool.
    pub store: Arc<dyn UserStore>,
}
