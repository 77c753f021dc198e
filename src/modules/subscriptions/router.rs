use super::handlers;
use crate::shared::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::initiate).get(handlers::list_mine))
        .route("/:id/confirm", post(handlers::confirm))
        .route("/:id", delete(handlers::cancel))
}
