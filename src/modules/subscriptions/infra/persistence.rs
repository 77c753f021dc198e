use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::modules::subscriptions::entities::{enums::SubscriptionStatus, subscription};
use crate::modules::subscriptions::repository::SubscriptionRepository;
use crate::shared::error::{AppError, AppResult};

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct SeaOrmSubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn insert(&self, sub: subscription::ActiveModel) -> AppResult<subscription::Model> {
        sub.insert(self.db.as_ref()).await.map_err(AppError::DbError)
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<subscription::Model>> {
        subscription::Entity::find()
            .filter(subscription::Column::Uuid.eq(uuid))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        subscription::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;
        Ok(())
    }

    async fn set_payment_order_ref(&self, id: i32, order_ref: &str) -> AppResult<()> {
        subscription::Entity::update_many()
            .col_expr(
                subscription::Column::PaymentOrderRef,
                Expr::value(Some(order_ref.to_string())),
            )
            .filter(subscription::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;
        Ok(())
    }

    async fn transition(
        &self,
        id: i32,
        expected: SubscriptionStatus,
        next: SubscriptionStatus,
    ) -> AppResult<bool> {
        let now = chrono::Utc::now().naive_utc();
        let result = subscription::Entity::update_many()
            .col_expr(subscription::Column::Status, Expr::value(next))
            .col_expr(subscription::Column::UpdatedAt, Expr::value(now))
            .filter(subscription::Column::Id.eq(id))
            .filter(subscription::Column::Status.eq(expected))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;
        Ok(result.rows_affected == 1)
    }

    async fn find_usable(
        &self,
        consumer_id: i32,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Option<subscription::Model>> {
        subscription::Entity::find()
            .filter(subscription::Column::ConsumerId.eq(consumer_id))
            .filter(subscription::Column::MessId.eq(mess_id))
            .filter(subscription::Column::Status.eq(SubscriptionStatus::Active))
            .filter(subscription::Column::EndsAt.gt(now))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn list_by_consumer(&self, consumer_id: i32) -> AppResult<Vec<subscription::Model>> {
        subscription::Entity::find()
            .filter(subscription::Column::ConsumerId.eq(consumer_id))
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn list_active_by_mess(
        &self,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Vec<subscription::Model>> {
        subscription::Entity::find()
            .filter(subscription::Column::MessId.eq(mess_id))
            .filter(subscription::Column::Status.eq(SubscriptionStatus::Active))
            .filter(subscription::Column::EndsAt.gt(now))
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone, Default)]
pub struct InMemorySubscriptionRepository {
    subs: Arc<Mutex<HashMap<i32, subscription::Model>>>,
    counter: Arc<Mutex<i32>>,
}

impl InMemorySubscriptionRepository {
    pub fn count(&self) -> usize {
        self.subs.lock().unwrap().len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn insert(&self, sub: subscription::ActiveModel) -> AppResult<subscription::Model> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;

        let model = subscription::Model {
            id: *counter,
            uuid: sub.uuid.unwrap(),
            consumer_id: sub.consumer_id.unwrap(),
            mess_id: sub.mess_id.unwrap(),
            plan_name: sub.plan_name.unwrap(),
            plan_description: sub.plan_description.unwrap(),
            price: sub.price.unwrap(),
            duration_days: sub.duration_days.unwrap(),
            starts_at: sub.starts_at.unwrap(),
            ends_at: sub.ends_at.unwrap(),
            status: sub.status.unwrap(),
            payment_order_ref: sub.payment_order_ref.unwrap(),
            created_at: sub.created_at.unwrap(),
            updated_at: sub.updated_at.unwrap(),
        };
        self.subs.lock().unwrap().insert(model.id, model.clone());
        Ok(model)
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<subscription::Model>> {
        Ok(self
            .subs
            .lock()
            .unwrap()
            .values()
            .find(|s| s.uuid == uuid)
            .cloned())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.subs.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn set_payment_order_ref(&self, id: i32, order_ref: &str) -> AppResult<()> {
        if let Some(sub) = self.subs.lock().unwrap().get_mut(&id) {
            sub.payment_order_ref = Some(order_ref.to_string());
        }
        Ok(())
    }

    async fn transition(
        &self,
        id: i32,
        expected: SubscriptionStatus,
        next: SubscriptionStatus,
    ) -> AppResult<bool> {
        let mut subs = self.subs.lock().unwrap();
        match subs.get_mut(&id) {
            Some(sub) if sub.status == expected => {
                sub.status = next;
                sub.updated_at = chrono::Utc::now().naive_utc();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_usable(
        &self,
        consumer_id: i32,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Option<subscription::Model>> {
        Ok(self
            .subs
            .lock()
            .unwrap()
            .values()
            .find(|s| {
                s.consumer_id == consumer_id && s.mess_id == mess_id && s.is_currently_usable(now)
            })
            .cloned())
    }

    async fn list_by_consumer(&self, consumer_id: i32) -> AppResult<Vec<subscription::Model>> {
        Ok(self
            .subs
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.consumer_id == consumer_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_mess(
        &self,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Vec<subscription::Model>> {
        Ok(self
            .subs
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.mess_id == mess_id && s.is_currently_usable(now))
            .cloned()
            .collect())
    }
}
