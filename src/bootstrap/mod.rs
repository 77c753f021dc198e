pub mod database;
pub mod repositories;
pub mod services;

use crate::shared::{config::Config, state::AppState};
use std::sync::Arc;

pub async fn create_app_state(config: &Config) -> AppState {
    let repos = if config.app_env == "dev" {
        repositories::init_in_memory()
    } else {
        let db = database::connect_postgres(config).await;
        tracing::info!("Connected to database");
        repositories::init_postgres(db)
    };

    let redis_pool = if config.app_env == "dev" {
        None
    } else {
        Some(database::connect_redis(config).await)
    };

    AppState {
        config: Arc::new(config.clone()),
        user_repo: repos.user_repo,
        mess_repo: repos.mess_repo,
        subscription_repo: repos.subscription_repo,
        code_store: services::init_code_store(config, redis_pool),
        notifier: services::init_notifier(config),
        payment_gateway: services::init_payment_gateway(config),
    }
}
