use super::entities::{enums::SubscriptionStatus, subscription};
use crate::shared::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn insert(&self, sub: subscription::ActiveModel) -> AppResult<subscription::Model>;
    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<subscription::Model>>;

    /// Compensation for a failed payment-order request; removes the row.
    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn set_payment_order_ref(&self, id: i32, order_ref: &str) -> AppResult<()>;

    /// Compare-and-swap status transition: succeeds (true) only if the row
    /// still holds `expected`. This is what makes concurrent confirm/cancel
    /// a first-wins race instead of a lost update.
    async fn transition(
        &self,
        id: i32,
        expected: SubscriptionStatus,
        next: SubscriptionStatus,
    ) -> AppResult<bool>;

    /// The consumer's currently-usable subscription to the mess, if any
    /// (ACTIVE and not past its end date).
    async fn find_usable(
        &self,
        consumer_id: i32,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Option<subscription::Model>>;

    async fn list_by_consumer(&self, consumer_id: i32) -> AppResult<Vec<subscription::Model>>;

    async fn list_active_by_mess(
        &self,
        mess_id: i32,
        now: NaiveDateTime,
    ) -> AppResult<Vec<subscription::Model>>;
}
