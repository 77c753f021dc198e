use crate::shared::error::AppResult;
use async_trait::async_trait;

/// Order reference handed back by the hosted checkout; the only thing the
/// core keeps for correlation.
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    pub order_ref: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment order for `amount` (major currency units) with the
    /// given receipt reference. May fail; callers surface that as a server
    /// error and must not leave partial state behind.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> AppResult<PaymentOrder>;
}
