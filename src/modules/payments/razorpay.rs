use super::gateway::{PaymentGateway, PaymentOrder};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

pub struct RazorpayGateway {
    key_id: String,
    key_secret: String,
    client: Client,
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            key_id,
            key_secret,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct RazorpayOrderResponse {
    id: String,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> AppResult<PaymentOrder> {
        // Razorpay takes the amount in the smallest currency unit
        let body = json!({
            "amount": amount * 100,
            "currency": currency,
            "receipt": receipt,
        });

        let order_res = self
            .client
            .post("https://api.razorpay.com/v1/orders")
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::InternalServerError(format!("Razorpay order request failed: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::InternalServerError(format!("Razorpay order rejected: {}", e))
            })?
            .json::<RazorpayOrderResponse>()
            .await
            .map_err(|e| {
                AppError::InternalServerError(format!("Razorpay order parse failed: {}", e))
            })?;

        Ok(PaymentOrder {
            order_ref: order_res.id,
            amount,
            currency: currency.to_string(),
        })
    }
}
