use super::handlers;
use crate::shared::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", put(handlers::upsert_profile))
        .route("/me/plans", post(handlers::add_plan))
        .route("/me/menus", put(handlers::upsert_menu))
        .route("/:id/menu", get(handlers::get_menu))
        .route("/:id/plans", get(handlers::list_plans))
        .route("/:id/subscribers", get(handlers::list_subscribers))
}
