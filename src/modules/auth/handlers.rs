use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use super::dtos::{LoginRequest, ProviderSignupRequest, SignupRequest};
use super::service::AuthService;
use crate::shared::{error::AppResult, state::AppState};

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user = AuthService::signup_consumer(
        state.user_repo.as_ref(),
        &req.name,
        &req.email,
        &req.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "account_id": user.uuid })),
    ))
}

pub async fn provider_signup(
    State(state): State<AppState>,
    Json(req): Json<ProviderSignupRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user = AuthService::signup_provider(
        state.user_repo.as_ref(),
        state.mess_repo.as_ref(),
        state.code_store.as_ref(),
        req,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "account_id": user.uuid })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let token = AuthService::login(
        state.user_repo.as_ref(),
        &state.config,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(json!({
        "token": token,
        "token_type": "Bearer",
    })))
}
