use super::entities::user;
use crate::shared::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>>;
    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>>;

    /// Inserts a new user; the unique email constraint surfaces as Conflict.
    async fn insert(&self, user: user::ActiveModel) -> AppResult<user::Model>;
}
