use axum::{Router, routing::get};

use crate::modules::{auth, messes, subscriptions, users, verification};
use crate::shared::{handlers, state::AppState};

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/verification", verification::router::router())
        .nest("/api/auth", auth::router::router())
        .nest("/api/users", users::router::router())
        .nest("/api/messes", messes::router::router())
        .nest("/api/subscriptions", subscriptions::router::router())
        .fallback(handlers::handler_404)
        .with_state(state)
}
