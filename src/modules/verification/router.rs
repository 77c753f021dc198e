use super::handlers;
use crate::shared::state::AppState;
use axum::{Router, routing::post};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-code", post(handlers::send_code))
        .route("/verify-code", post(handlers::verify_code))
}
