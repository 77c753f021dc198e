use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use serde_json::{Value, json};

use super::dtos::{CreatePlanRequest, MenuQuery, UpsertMenuRequest, UpsertProfileRequest};
use super::service::MessService;
use crate::modules::auth::service::{AuthService, Claims};
use crate::shared::{
    error::{AppError, AppResult},
    state::AppState,
};

pub async fn upsert_profile(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<UpsertProfileRequest>,
) -> AppResult<Json<Value>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let mess = MessService::upsert_profile(state.mess_repo.as_ref(), &user, req).await?;
    Ok(Json(json!({ "mess_id": mess.id })))
}

pub async fn add_plan(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreatePlanRequest>,
) -> AppResult<Json<Value>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let plan = MessService::add_plan(state.mess_repo.as_ref(), &user, req).await?;
    Ok(Json(json!({ "plan_id": plan.id })))
}

pub async fn upsert_menu(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<UpsertMenuRequest>,
) -> AppResult<Json<Value>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let menu = MessService::upsert_menu(state.mess_repo.as_ref(), &user, req).await?;
    Ok(Json(json!({ "menu_id": menu.id })))
}

pub async fn get_menu(
    State(state): State<AppState>,
    Path(mess_id): Path<i32>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Value>> {
    let menu = MessService::menu_for_date(state.mess_repo.as_ref(), mess_id, query.date).await?;
    Ok(Json(json!({ "menu": menu })))
}

pub async fn list_plans(
    State(state): State<AppState>,
    Path(mess_id): Path<i32>,
) -> AppResult<Json<Value>> {
    state
        .mess_repo
        .find_by_id(mess_id)
        .await?
        .ok_or(AppError::NotFound("Mess not found".to_string()))?;
    let plans = state.mess_repo.list_plans(mess_id).await?;
    Ok(Json(json!({ "plans": plans })))
}

#[derive(Serialize)]
pub struct SubscriberResponse {
    pub consumer_name: String,
    pub consumer_email: String,
    pub plan_name: String,
    pub starts_at: chrono::NaiveDateTime,
    pub ends_at: chrono::NaiveDateTime,
}

pub async fn list_subscribers(
    State(state): State<AppState>,
    claims: Claims,
    Path(mess_id): Path<i32>,
) -> AppResult<Json<Vec<SubscriberResponse>>> {
    let user = AuthService::current_user(state.user_repo.as_ref(), &claims).await?;
    let mess = state
        .mess_repo
        .find_by_id(mess_id)
        .await?
        .ok_or(AppError::NotFound("Mess not found".to_string()))?;
    if mess.owner_id != user.id {
        return Err(AppError::Forbidden(
            "Only the mess owner can view subscribers".to_string(),
        ));
    }

    let now = chrono::Utc::now().naive_utc();
    let subs = state
        .subscription_repo
        .list_active_by_mess(mess_id, now)
        .await?;

    let mut rows = Vec::with_capacity(subs.len());
    for sub in subs {
        let consumer = state
            .user_repo
            .find_by_id(sub.consumer_id)
            .await?
            .ok_or(AppError::InternalServerError(
                "Subscriber account missing".to_string(),
            ))?;
        rows.push(SubscriberResponse {
            consumer_name: consumer.name,
            consumer_email: consumer.email,
            plan_name: sub.plan_name,
            starts_at: sub.starts_at,
            ends_at: sub.ends_at,
        });
    }

    Ok(Json(rows))
}
