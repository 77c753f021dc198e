pub mod auth;
pub mod messes;
pub mod notifications;
pub mod payments;
pub mod subscriptions;
pub mod users;
pub mod verification;
