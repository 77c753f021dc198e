use crate::modules::messes::infra::persistence::{InMemoryMessRepository, SeaOrmMessRepository};
use crate::modules::messes::repository::MessRepository;
use crate::modules::subscriptions::infra::persistence::{
    InMemorySubscriptionRepository, SeaOrmSubscriptionRepository,
};
use crate::modules::subscriptions::repository::SubscriptionRepository;
use crate::modules::users::infra::persistence::{InMemoryUserRepository, SeaOrmUserRepository};
use crate::modules::users::repository::UserRepository;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub struct Repositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub mess_repo: Arc<dyn MessRepository>,
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
}

pub fn init_in_memory() -> Repositories {
    tracing::warn!("Using in-memory repositories (dev env); data will not survive a restart");
    Repositories {
        user_repo: Arc::new(InMemoryUserRepository::default()),
        mess_repo: Arc::new(InMemoryMessRepository::default()),
        subscription_repo: Arc::new(InMemorySubscriptionRepository::default()),
    }
}

pub fn init_postgres(db: DatabaseConnection) -> Repositories {
    let db = Arc::new(db);
    Repositories {
        user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
        mess_repo: Arc::new(SeaOrmMessRepository::new(db.clone())),
        subscription_repo: Arc::new(SeaOrmSubscriptionRepository::new(db)),
    }
}
