use super::handlers;
use crate::shared::state::AppState;
use axum::{Router, routing::get};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(handlers::get_me))
}
