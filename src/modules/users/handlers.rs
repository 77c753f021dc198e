use axum::{Json, extract::State};
use serde::Serialize;

use crate::modules::auth::service::Claims;
use crate::modules::users::entities::enums::Role;
use crate::shared::{
    error::{AppError, AppResult},
    state::AppState,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub uuid: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::NaiveDateTime,
}

pub async fn get_me(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        uuid: user.uuid,
        name: user.name,
        email: user.email,
        role: user.role,
        created_at: user.created_at,
    }))
}
