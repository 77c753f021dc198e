use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use super::dtos::{SendCodeRequest, VerifyCodeRequest};
use super::service::VerificationService;
use crate::shared::{error::AppResult, state::AppState};

pub async fn send_code(
    State(state): State<AppState>,
    Json(req): Json<SendCodeRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    VerificationService::request_code(
        state.code_store.as_ref(),
        state.notifier.as_ref(),
        &req.email,
        &req.purpose,
    )
    .await?;

    Ok((StatusCode::ACCEPTED, Json(json!({ "accepted": true }))))
}

pub async fn verify_code(
    State(state): State<AppState>,
    Json(req): Json<VerifyCodeRequest>,
) -> AppResult<Json<Value>> {
    VerificationService::check_code(
        state.code_store.as_ref(),
        &req.email,
        &req.code,
        &req.purpose,
    )
    .await?;

    Ok(Json(json!({ "verified": true })))
}
