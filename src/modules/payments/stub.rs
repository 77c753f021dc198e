use super::gateway::{PaymentGateway, PaymentOrder};
use crate::shared::error::AppResult;
use async_trait::async_trait;

/// Gateway used in dev/test: fabricates an order reference locally instead
/// of calling the hosted checkout.
#[derive(Default)]
pub struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> AppResult<PaymentOrder> {
        let order_ref = format!("order_dev_{}", uuid::Uuid::new_v4().simple());
        tracing::info!("Stub payment order {} for receipt {}", order_ref, receipt);
        Ok(PaymentOrder {
            order_ref,
            amount,
            currency: currency.to_string(),
        })
    }
}
