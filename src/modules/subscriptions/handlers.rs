use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};

use super::dtos::InitiateSubscriptionRequest;
use super::entities::enums::SubscriptionStatus;
use super::service::SubscriptionService;
use crate::modules::auth::service::{AuthService, Claims};
use crate::shared::{error::AppResult, state::AppState};

pub async fn initiate(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<InitiateSubscriptionRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let (sub, order) = SubscriptionService::initiate(
        state.subscription_repo.as_ref(),
        state.mess_repo.as_ref(),
        state.payment_gateway.as_ref(),
        &user,
        req.mess_id,
        req.plan_id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "subscription_id": sub.uuid,
            "payment_order_ref": order.order_ref,
        })),
    ))
}

pub async fn confirm(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    SubscriptionService::confirm(
        state.subscription_repo.as_ref(),
        state.mess_repo.as_ref(),
        state.user_repo.as_ref(),
        state.notifier.as_ref(),
        &id,
    )
    .await?;

    Ok(Json(json!({ "ok": true })))
}

pub async fn cancel(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    SubscriptionService::cancel(state.subscription_repo.as_ref(), &user, &id).await?;
    Ok(Json(json!({ "ok": true })))
}

#[derive(Serialize)]
pub struct SubscriptionResponse {
    pub subscription_id: String,
    pub mess_id: i32,
    pub plan_name: String,
    pub price: i64,
    pub starts_at: chrono::NaiveDateTime,
    pub ends_at: chrono::NaiveDateTime,
    pub status: SubscriptionStatus,
    pub currently_active: bool,
}

pub async fn list_mine(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<Vec<SubscriptionResponse>>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let now = chrono::Utc::now().naive_utc();

    let subs = state.subscription_repo.list_by_consumer(user.id).await?;
    let rows = subs
        .into_iter()
        .map(|sub| SubscriptionResponse {
            currently_active: sub.is_currently_usable(now),
            subscription_id: sub.uuid,
            mess_id: sub.mess_id,
            plan_name: sub.plan_name,
            price: sub.price,
            starts_at: sub.starts_at,
            ends_at: sub.ends_at,
            status: sub.status,
        })
        .collect();

    Ok(Json(rows))
}
