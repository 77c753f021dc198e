use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Handler for 404 Not Found
pub async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "reason": "not_found",
            "error_code": 404,
        })),
    )
}
