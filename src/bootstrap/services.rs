use crate::modules::notifications::email::{Notifier, SmtpNotifier};
use crate::modules::payments::gateway::PaymentGateway;
use crate::modules::payments::razorpay::RazorpayGateway;
use crate::modules::payments::stub::StubGateway;
use crate::modules::verification::store::{CodeStore, InMemoryCodeStore, RedisCodeStore};
use crate::shared::config::Config;
use std::sync::Arc;

pub fn init_notifier(config: &Config) -> Arc<dyn Notifier> {
    Arc::new(SmtpNotifier::new(config))
}

pub fn init_payment_gateway(config: &Config) -> Arc<dyn PaymentGateway> {
    if config.app_env == "dev" || config.app_env == "test" {
        tracing::warn!("Using stub payment gateway (dev env)");
        Arc::new(StubGateway)
    } else {
        Arc::new(RazorpayGateway::new(
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        ))
    }
}

pub fn init_code_store(
    config: &Config,
    redis_pool: Option<deadpool_redis::Pool>,
) -> Arc<dyn CodeStore> {
    match redis_pool {
        Some(pool) if config.app_env != "dev" => Arc::new(RedisCodeStore::new(pool)),
        _ => {
            tracing::warn!("Using in-memory verification code store (dev env)");
            Arc::new(InMemoryCodeStore::new())
        }
    }
}
