use super::dtos::{CreatePlanRequest, UpsertMenuRequest, UpsertProfileRequest};
use super::entities::{enums::ServiceType, menu, mess, plan};
use super::repository::{MenuUpsert, MessRepository};
use crate::modules::users::entities::{enums::Role, user};
use crate::shared::error::{AppError, AppResult};
use sea_orm::Set;

pub struct MessService;

impl MessService {
    /// Creates the minimal profile a freshly signed-up provider gets. If one
    /// already exists for the owner it is returned untouched.
    pub async fn create_skeleton(
        repo: &dyn MessRepository,
        owner: &user::Model,
        image_url: Option<String>,
    ) -> AppResult<mess::Model> {
        if let Some(existing) = repo.find_by_owner(owner.id).await? {
            return Ok(existing);
        }

        let now = chrono::Utc::now().naive_utc();
        let skeleton = mess::ActiveModel {
            owner_id: Set(owner.id),
            name: Set(format!("{}'s Mess", owner.name)),
            service_type: Set(ServiceType::Both),
            address: Set("".to_string()),
            latitude: Set(None),
            longitude: Set(None),
            image_url: Set(image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        repo.insert(skeleton).await
    }

    pub async fn upsert_profile(
        repo: &dyn MessRepository,
        owner: &user::Model,
        req: UpsertProfileRequest,
    ) -> AppResult<mess::Model> {
        Self::require_provider(owner)?;
        if req.name.trim().is_empty() {
            return Err(AppError::BadRequest("Mess name is required".to_string()));
        }

        let now = chrono::Utc::now().naive_utc();
        match repo.find_by_owner(owner.id).await? {
            Some(existing) => {
                let am = mess::ActiveModel {
                    id: Set(existing.id),
                    owner_id: Set(existing.owner_id),
                    name: Set(req.name.trim().to_string()),
                    service_type: Set(req.service_type),
                    address: Set(req.address),
                    latitude: Set(req.latitude),
                    longitude: Set(req.longitude),
                    image_url: Set(req.image_url),
                    created_at: Set(existing.created_at),
                    updated_at: Set(now),
                };
                repo.update(am).await
            }
            None => {
                let am = mess::ActiveModel {
                    owner_id: Set(owner.id),
                    name: Set(req.name.trim().to_string()),
                    service_type: Set(req.service_type),
                    address: Set(req.address),
                    latitude: Set(req.latitude),
                    longitude: Set(req.longitude),
                    image_url: Set(req.image_url),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                repo.insert(am).await
            }
        }
    }

    pub async fn add_plan(
        repo: &dyn MessRepository,
        owner: &user::Model,
        req: CreatePlanRequest,
    ) -> AppResult<plan::Model> {
        Self::require_provider(owner)?;
        if req.name.trim().is_empty() {
            return Err(AppError::BadRequest("Plan name is required".to_string()));
        }
        if req.price <= 0 || req.duration_days <= 0 {
            return Err(AppError::BadRequest(
                "Plan price and duration must be positive".to_string(),
            ));
        }

        let mess = Self::owned_mess(repo, owner).await?;
        let am = plan::ActiveModel {
            mess_id: Set(mess.id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            price: Set(req.price),
            duration_days: Set(req.duration_days),
            ..Default::default()
        };
        repo.insert_plan(am).await
    }

    pub async fn upsert_menu(
        repo: &dyn MessRepository,
        owner: &user::Model,
        req: UpsertMenuRequest,
    ) -> AppResult<menu::Model> {
        Self::require_provider(owner)?;
        let mess = Self::owned_mess(repo, owner).await?;
        repo.upsert_menu(
            mess.id,
            req.date,
            MenuUpsert {
                breakfast: req.breakfast,
                lunch: req.lunch,
                dinner: req.dinner,
            },
        )
        .await
    }

    pub async fn menu_for_date(
        repo: &dyn MessRepository,
        mess_id: i32,
        date: chrono::NaiveDate,
    ) -> AppResult<Option<menu::Model>> {
        repo.find_by_id(mess_id)
            .await?
            .ok_or(AppError::NotFound("Mess not found".to_string()))?;
        repo.find_menu(mess_id, date).await
    }

    async fn owned_mess(
        repo: &dyn MessRepository,
        owner: &user::Model,
    ) -> AppResult<mess::Model> {
        repo.find_by_owner(owner.id).await?.ok_or(AppError::NotFound(
            "Set up your mess profile first".to_string(),
        ))
    }

    fn require_provider(user: &user::Model) -> AppResult<()> {
        if user.role != Role::Provider {
            return Err(AppError::Forbidden(
                "Only mess owners can do this".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::messes::infra::persistence::InMemoryMessRepository;
    use crate::modules::users::entities::{enums::Role, user};

    fn a_user(id: i32, role: Role) -> user::Model {
        let now = chrono::Utc::now().naive_utc();
        user::Model {
            id,
            uuid: format!("uuid-{}", id),
            name: "Ravi".to_string(),
            email: format!("u{}@x.com", id),
            password_hash: "hash".to_string(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn skeleton_is_created_once_per_owner() {
        let repo = InMemoryMessRepository::default();
        let owner = a_user(1, Role::Provider);

        let first = MessService::create_skeleton(&repo, &owner, None).await.unwrap();
        let second = MessService::create_skeleton(&repo, &owner, Some("img".to_string()))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        // Second call returned the existing profile untouched
        assert_eq!(second.image_url, None);
    }

    #[tokio::test]
    async fn consumers_cannot_manage_a_mess() {
        let repo = InMemoryMessRepository::default();
        let consumer = a_user(1, Role::Consumer);

        let err = MessService::add_plan(
            &repo,
            &consumer,
            CreatePlanRequest {
                name: "Monthly".to_string(),
                description: "".to_string(),
                price: 500,
                duration_days: 30,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn menu_upsert_replaces_the_same_date() {
        let repo = InMemoryMessRepository::default();
        let owner = a_user(1, Role::Provider);
        MessService::create_skeleton(&repo, &owner, None).await.unwrap();

        let date = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        MessService::upsert_menu(
            &repo,
            &owner,
            UpsertMenuRequest {
                date,
                breakfast: Some("Poha".to_string()),
                lunch: None,
                dinner: None,
            },
        )
        .await
        .unwrap();

        let updated = MessService::upsert_menu(
            &repo,
            &owner,
            UpsertMenuRequest {
                date,
                breakfast: Some("Idli".to_string()),
                lunch: Some("Thali".to_string()),
                dinner: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.breakfast.as_deref(), Some("Idli"));

        let mess = repo.find_by_owner(owner.id).await.unwrap().unwrap();
        let stored = MessService::menu_for_date(&repo, mess.id, date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, updated.id);
        assert_eq!(stored.lunch.as_deref(), Some("Thali"));
    }

    #[tokio::test]
    async fn plan_needs_positive_price_and_duration() {
        let repo = InMemoryMessRepository::default();
        let owner = a_user(1, Role::Provider);
        MessService::create_skeleton(&repo, &owner, None).await.unwrap();

        let err = MessService::add_plan(
            &repo,
            &owner,
            CreatePlanRequest {
                name: "Monthly".to_string(),
                description: "".to_string(),
                price: 0,
                duration_days: 30,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
