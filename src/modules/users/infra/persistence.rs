use async_trait::async_trait;
use sea_orm::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::modules::users::entities::user;
use crate::modules::users::repository::UserRepository;
use crate::shared::error::{AppError, AppResult};

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        user::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Uuid.eq(uuid))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, user: user::ActiveModel) -> AppResult<user::Model> {
        user.insert(self.db.as_ref()).await.map_err(|e| {
            if e.to_string().contains("duplicate key") {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::DbError(e)
            }
        })
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<i32, user::Model>>>,
    counter: Arc<Mutex<i32>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.uuid == uuid).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: user::ActiveModel) -> AppResult<user::Model> {
        let mut users = self.users.lock().unwrap();
        let email = user.email.clone().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let mut counter = self.counter.lock().unwrap();
        *counter += 1;

        let model = user::Model {
            id: *counter,
            uuid: user.uuid.unwrap(),
            name: user.name.unwrap(),
            email,
            password_hash: user.password_hash.unwrap(),
            role: user.role.unwrap(),
            created_at: user.created_at.unwrap(),
            updated_at: user.updated_at.unwrap(),
        };
        users.insert(model.id, model.clone());
        Ok(model)
    }
}
