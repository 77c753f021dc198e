use crate::modules::messes::repository::MessRepository;
use crate::modules::notifications::email::Notifier;
use crate::modules::payments::gateway::PaymentGateway;
use crate::modules::subscriptions::repository::SubscriptionRepository;
use crate::modules::users::repository::UserRepository;
use crate::modules::verification::store::CodeStore;
use crate::shared::config::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_repo: Arc<dyn UserRepository>,
    pub mess_repo: Arc<dyn MessRepository>,
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
    pub code_store: Arc<dyn CodeStore>,
    pub notifier: Arc<dyn Notifier>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}
