use super::handlers;
use crate::shared::state::AppState;
use axum::{Router, routing::post};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/provider-signup", post(handlers::provider_signup))
        .route("/login", post(handlers::login))
}
