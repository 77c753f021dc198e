use super::entities::{enums::Role, user};
use super::repository::UserRepository;
use super::utils::{check_password, normalize_email};
use crate::shared::error::{AppError, AppResult};
use sea_orm::Set;

pub struct UserService;

impl UserService {
    pub async fn create_user(
        repo: &dyn UserRepository,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<user::Model> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if let Some(msg) = check_password(password) {
            return Err(AppError::BadRequest(msg.to_string()));
        }

        if repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalServerError(format!("Hash failed: {}", e)))?;

        let now = chrono::Utc::now().naive_utc();
        let new_user = user::ActiveModel {
            uuid: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        repo.insert(new_user).await
    }

    pub async fn authenticate(
        repo: &dyn UserRepository,
        email: &str,
        password: &str,
    ) -> AppResult<user::Model> {
        let email = normalize_email(email);
        let user = repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

        let ok = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalServerError(format!("Verify failed: {}", e)))?;
        if !ok {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::infra::persistence::InMemoryUserRepository;

    #[tokio::test]
    async fn create_user_hashes_password_and_normalizes_email() {
        let repo = InMemoryUserRepository::default();
        let user = UserService::create_user(&repo, "Asha", " Asha@X.com ", "hunter2pass", Role::Consumer)
            .await
            .unwrap();

        assert_eq!(user.email, "asha@x.com");
        assert_ne!(user.password_hash, "hunter2pass");
        assert_eq!(user.role, Role::Consumer);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::default();
        UserService::create_user(&repo, "Asha", "a@x.com", "hunter2pass", Role::Consumer)
            .await
            .unwrap();

        let err = UserService::create_user(&repo, "Other", "a@x.com", "hunter2pass", Role::Provider)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password_and_unknown_email() {
        let repo = InMemoryUserRepository::default();
        UserService::create_user(&repo, "Asha", "a@x.com", "hunter2pass", Role::Consumer)
            .await
            .unwrap();

        let user = UserService::authenticate(&repo, "a@x.com", "hunter2pass")
            .await
            .unwrap();
        assert_eq!(user.name, "Asha");

        let err = UserService::authenticate(&repo, "a@x.com", "wrongpassword")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = UserService::authenticate(&repo, "b@x.com", "hunter2pass")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let repo = InMemoryUserRepository::default();
        let err = UserService::create_user(&repo, "Asha", "a@x.com", "short", Role::Consumer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
