use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::modules::auth::dtos::ProviderSignupRequest;
use crate::modules::messes::repository::MessRepository;
use crate::modules::messes::service::MessService;
use crate::modules::users::entities::{enums::Role, user};
use crate::modules::users::repository::UserRepository;
use crate::modules::users::service::UserService;
use crate::modules::verification::service::VerificationService;
use crate::modules::verification::store::{CodeStore, PURPOSE_PROVIDER_SIGNUP};
use crate::shared::config::Config;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User UUID
    pub exp: usize,
    pub iat: usize,
}

pub struct AuthService;

impl AuthService {
    /// Plain student signup; no code gate.
    pub async fn signup_consumer(
        user_repo: &dyn UserRepository,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<user::Model> {
        UserService::create_user(user_repo, name, email, password, Role::Consumer).await
    }

    /// Mess-owner signup, gated by the emailed code. The code was already
    /// checked once by the verify endpoint but is deliberately re-checked
    /// here: verify does not consume it, and the client fills the rest of
    /// the form in between. Only after the account and its skeleton profile
    /// exist is the code invalidated, so any failure before that point
    /// leaves it usable for a retry.
    pub async fn signup_provider(
        user_repo: &dyn UserRepository,
        mess_repo: &dyn MessRepository,
        code_store: &dyn CodeStore,
        req: ProviderSignupRequest,
    ) -> AppResult<user::Model> {
        VerificationService::check_code(code_store, &req.email, &req.code, PURPOSE_PROVIDER_SIGNUP)
            .await?;

        let user =
            UserService::create_user(user_repo, &req.name, &req.email, &req.password, Role::Provider)
                .await?;
        MessService::create_skeleton(mess_repo, &user, req.image_url).await?;

        if let Err(e) = VerificationService::consume(code_store, &req.email).await {
            // The account exists; a stale code is harmless next to failing now
            tracing::warn!("Failed to invalidate verification code: {}", e);
        }

        tracing::info!("Provider account created for {}", user.email);
        Ok(user)
    }

    pub async fn login(
        user_repo: &dyn UserRepository,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<String> {
        let user = UserService::authenticate(user_repo, email, password).await?;
        Self::generate_jwt(config, &user.uuid)
    }

    pub async fn current_user(
        user_repo: &dyn UserRepository,
        claims: &Claims,
    ) -> AppResult<user::Model> {
        user_repo
            .find_by_uuid(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized("Unknown account".to_string()))
    }

    fn generate_jwt(config: &Config, user_uuid: &str) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(24))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_uuid.to_string(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(format!("JWT generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::messes::infra::persistence::InMemoryMessRepository;
    use crate::modules::notifications::email::testing::RecordingNotifier;
    use crate::modules::users::infra::persistence::InMemoryUserRepository;
    use crate::modules::verification::store::InMemoryCodeStore;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    fn signup_request(email: &str, code: &str) -> ProviderSignupRequest {
        ProviderSignupRequest {
            email: email.to_string(),
            code: code.to_string(),
            name: "Ravi".to_string(),
            password: "hunter2pass".to_string(),
            image_url: None,
        }
    }

    async fn issue_code(store: &InMemoryCodeStore, notifier: &RecordingNotifier) -> String {
        VerificationService::request_code(store, notifier, "a@x.com", PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
        notifier.codes.lock().unwrap().last().unwrap().1.clone()
    }

    #[tokio::test]
    async fn full_provider_signup_consumes_the_code() {
        let users = InMemoryUserRepository::default();
        let messes = InMemoryMessRepository::default();
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        let code = issue_code(&store, &notifier).await;
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        // The client-side verify step; non-consuming
        VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();

        let user = AuthService::signup_provider(
            &users,
            &messes,
            &store,
            signup_request("a@x.com", &code),
        )
        .await
        .unwrap();

        assert_eq!(user.role, Role::Provider);
        assert!(messes.find_by_owner(user.id).await.unwrap().is_some());
        // Consumed: nothing left in the store for the subject
        assert!(store.lookup("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_fails_and_leaves_the_code_valid() {
        let users = InMemoryUserRepository::default();
        let messes = InMemoryMessRepository::default();
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        let code = issue_code(&store, &notifier).await;
        AuthService::signup_provider(&users, &messes, &store, signup_request("a@x.com", &code))
            .await
            .unwrap();

        let code = issue_code(&store, &notifier).await;
        let err =
            AuthService::signup_provider(&users, &messes, &store, signup_request("a@x.com", &code))
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The code survived the failed attempt and still validates
        VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_code_creates_no_account() {
        let users = InMemoryUserRepository::default();
        let messes = InMemoryMessRepository::default();
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        let code = issue_code(&store, &notifier).await;
        store.advance(chrono::Duration::minutes(11));

        let err =
            AuthService::signup_provider(&users, &messes, &store, signup_request("a@x.com", &code))
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(users.find_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn code_issued_for_another_purpose_is_rejected() {
        let users = InMemoryUserRepository::default();
        let messes = InMemoryMessRepository::default();
        let store = InMemoryCodeStore::new();

        let code = store.issue("a@x.com", "password-reset").await.unwrap();
        let err =
            AuthService::signup_provider(&users, &messes, &store, signup_request("a@x.com", &code))
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(users.find_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_issues_a_decodable_token() {
        let users = InMemoryUserRepository::default();
        let config = Config::for_tests();

        let user = AuthService::signup_consumer(&users, "Asha", "asha@x.com", "hunter2pass")
            .await
            .unwrap();
        let token = AuthService::login(&users, &config, "asha@x.com", "hunter2pass")
            .await
            .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, user.uuid);
    }
}
