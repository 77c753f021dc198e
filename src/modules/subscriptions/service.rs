use super::entities::{enums::SubscriptionStatus, subscription};
use super::repository::SubscriptionRepository;
use crate::modules::messes::repository::MessRepository;
use crate::modules::notifications::email::{Notifier, PurchaseDetails};
use crate::modules::payments::gateway::{PaymentGateway, PaymentOrder};
use crate::modules::users::entities::{enums::Role, user};
use crate::modules::users::repository::UserRepository;
use crate::shared::error::{AppError, AppResult};
use sea_orm::Set;

const CURRENCY: &str = "INR";

pub struct SubscriptionService;

impl SubscriptionService {
    /// Creates a CREATED-state subscription and requests a payment order for
    /// it. The two steps are not atomic; a failed order request deletes the
    /// just-created row so no orphaned CREATED record is left behind.
    pub async fn initiate(
        sub_repo: &dyn SubscriptionRepository,
        mess_repo: &dyn MessRepository,
        gateway: &dyn PaymentGateway,
        consumer: &user::Model,
        mess_id: i32,
        plan_id: i32,
    ) -> AppResult<(subscription::Model, PaymentOrder)> {
        if consumer.role != Role::Consumer {
            return Err(AppError::Forbidden(
                "Only students can subscribe".to_string(),
            ));
        }

        mess_repo
            .find_by_id(mess_id)
            .await?
            .ok_or(AppError::NotFound("Mess not found".to_string()))?;
        let plan = mess_repo
            .find_plan(mess_id, plan_id)
            .await?
            .ok_or(AppError::NotFound("Plan not found".to_string()))?;

        let now = chrono::Utc::now().naive_utc();
        if sub_repo.find_usable(consumer.id, mess_id, now).await?.is_some() {
            return Err(AppError::Conflict(
                "Already subscribed to this mess".to_string(),
            ));
        }

        let ends_at = now + chrono::Duration::days(plan.duration_days as i64);
        let sub = sub_repo
            .insert(subscription::ActiveModel {
                uuid: Set(uuid::Uuid::new_v4().to_string()),
                consumer_id: Set(consumer.id),
                mess_id: Set(mess_id),
                plan_name: Set(plan.name.clone()),
                plan_description: Set(plan.description.clone()),
                price: Set(plan.price),
                duration_days: Set(plan.duration_days),
                starts_at: Set(now),
                ends_at: Set(ends_at),
                status: Set(SubscriptionStatus::Created),
                payment_order_ref: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .await?;

        let order = match gateway.create_order(plan.price, CURRENCY, &sub.uuid).await {
            Ok(order) => order,
            Err(e) => {
                // Compensate before surfacing the gateway failure
                sub_repo.delete(sub.id).await?;
                return Err(e);
            }
        };

        sub_repo.set_payment_order_ref(sub.id, &order.order_ref).await?;

        let mut sub = sub;
        sub.payment_order_ref = Some(order.order_ref.clone());
        Ok((sub, order))
    }

    /// Activates a subscription after the client reports payment success.
    /// The transition is a CAS from CREATED; anything else is a conflict,
    /// which also makes a second confirm call fail cleanly.
    pub async fn confirm(
        sub_repo: &dyn SubscriptionRepository,
        mess_repo: &dyn MessRepository,
        user_repo: &dyn UserRepository,
        notifier: &dyn Notifier,
        uuid: &str,
    ) -> AppResult<subscription::Model> {
        let sub = sub_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or(AppError::NotFound("Subscription not found".to_string()))?;

        let switched = sub_repo
            .transition(sub.id, SubscriptionStatus::Created, SubscriptionStatus::Active)
            .await?;
        if !switched {
            return Err(AppError::Conflict(
                "Subscription is not awaiting payment confirmation".to_string(),
            ));
        }

        // The transition has committed; a notification hiccup must not fail it
        if let Err(e) = Self::notify_purchase(mess_repo, user_repo, notifier, &sub).await {
            tracing::warn!("Purchase confirmation mail failed: {}", e);
        }

        let mut sub = sub;
        sub.status = SubscriptionStatus::Active;
        Ok(sub)
    }

    /// Cancels an active subscription. Only the owning consumer may cancel,
    /// and only from ACTIVE.
    pub async fn cancel(
        sub_repo: &dyn SubscriptionRepository,
        requester: &user::Model,
        uuid: &str,
    ) -> AppResult<()> {
        let sub = sub_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or(AppError::NotFound("Subscription not found".to_string()))?;

        if requester.role == Role::Provider {
            return Err(AppError::Forbidden(
                "Mess owners cannot cancel a student's subscription".to_string(),
            ));
        }
        if sub.consumer_id != requester.id {
            return Err(AppError::Forbidden(
                "Not your subscription".to_string(),
            ));
        }

        let switched = sub_repo
            .transition(sub.id, SubscriptionStatus::Active, SubscriptionStatus::Cancelled)
            .await?;
        if !switched {
            return Err(AppError::Conflict(
                "Only an active subscription can be cancelled".to_string(),
            ));
        }

        Ok(())
    }

    async fn notify_purchase(
        mess_repo: &dyn MessRepository,
        user_repo: &dyn UserRepository,
        notifier: &dyn Notifier,
        sub: &subscription::Model,
    ) -> AppResult<()> {
        let mess = mess_repo
            .find_by_id(sub.mess_id)
            .await?
            .ok_or(AppError::NotFound("Mess not found".to_string()))?;
        let consumer = user_repo
            .find_by_id(sub.consumer_id)
            .await?
            .ok_or(AppError::NotFound("Consumer not found".to_string()))?;

        notifier
            .send_purchase_confirmation(
                &consumer.email,
                &PurchaseDetails {
                    mess_name: mess.name,
                    plan_name: sub.plan_name.clone(),
                    price: sub.price,
                    starts_at: sub.starts_at,
                    ends_at: sub.ends_at,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::messes::dtos::CreatePlanRequest;
    use crate::modules::messes::infra::persistence::InMemoryMessRepository;
    use crate::modules::messes::service::MessService;
    use crate::modules::notifications::email::testing::RecordingNotifier;
    use crate::modules::payments::stub::StubGateway;
    use crate::modules::subscriptions::infra::persistence::InMemorySubscriptionRepository;
    use crate::modules::users::infra::persistence::InMemoryUserRepository;
    use crate::modules::users::service::UserService;
    use async_trait::async_trait;

    struct FailingGateway;

    #[async_trait]
    impl PaymentGateway for FailingGateway {
        async fn create_order(
            &self,
            _amount: i64,
            _currency: &str,
            _receipt: &str,
        ) -> AppResult<PaymentOrder> {
            Err(AppError::InternalServerError(
                "gateway unreachable".to_string(),
            ))
        }
    }

    struct Fixture {
        users: InMemoryUserRepository,
        messes: InMemoryMessRepository,
        subs: InMemorySubscriptionRepository,
        consumer: user::Model,
        provider: user::Model,
        mess_id: i32,
        plan_id: i32,
    }

    async fn fixture() -> Fixture {
        let users = InMemoryUserRepository::default();
        let messes = InMemoryMessRepository::default();
        let subs = InMemorySubscriptionRepository::default();

        let consumer =
            UserService::create_user(&users, "Asha", "asha@x.com", "hunter2pass", Role::Consumer)
                .await
                .unwrap();
        let provider =
            UserService::create_user(&users, "Ravi", "ravi@x.com", "hunter2pass", Role::Provider)
                .await
                .unwrap();

        let mess = MessService::create_skeleton(&messes, &provider, None).await.unwrap();
        let plan = MessService::add_plan(
            &messes,
            &provider,
            CreatePlanRequest {
                name: "Monthly Thali".to_string(),
                description: "Two meals a day".to_string(),
                price: 500,
                duration_days: 30,
            },
        )
        .await
        .unwrap();

        Fixture {
            users,
            messes,
            subs,
            consumer,
            provider,
            mess_id: mess.id,
            plan_id: plan.id,
        }
    }

    #[tokio::test]
    async fn initiate_creates_record_with_plan_window_and_order_ref() {
        let f = fixture().await;
        let (sub, order) = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Created);
        assert_eq!(sub.price, 500);
        assert_eq!(sub.ends_at - sub.starts_at, chrono::Duration::days(30));
        assert_eq!(sub.payment_order_ref.as_deref(), Some(order.order_ref.as_str()));
        assert_eq!(order.amount, 500);
    }

    #[tokio::test]
    async fn initiate_rejects_unknown_mess_and_plan() {
        let f = fixture().await;

        let err = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            999,
            f.plan_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            999,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(f.subs.count(), 0);
    }

    #[tokio::test]
    async fn initiate_rejects_provider_accounts() {
        let f = fixture().await;
        let err = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.provider,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn gateway_failure_deletes_the_created_record() {
        let f = fixture().await;
        let err = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &FailingGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InternalServerError(_)));
        assert_eq!(f.subs.count(), 0);
    }

    #[tokio::test]
    async fn duplicate_active_subscription_is_a_conflict() {
        let f = fixture().await;
        let notifier = RecordingNotifier::default();

        let (sub, _) = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap();
        SubscriptionService::confirm(&f.subs, &f.messes, &f.users, &notifier, &sub.uuid)
            .await
            .unwrap();

        let err = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(f.subs.count(), 1);
    }

    #[tokio::test]
    async fn lapsed_active_subscription_does_not_block_a_new_one() {
        let f = fixture().await;
        let now = chrono::Utc::now().naive_utc();

        // An ACTIVE record whose window already ended
        f.subs
            .insert(subscription::ActiveModel {
                uuid: Set("old-sub".to_string()),
                consumer_id: Set(f.consumer.id),
                mess_id: Set(f.mess_id),
                plan_name: Set("Monthly Thali".to_string()),
                plan_description: Set("".to_string()),
                price: Set(500),
                duration_days: Set(30),
                starts_at: Set(now - chrono::Duration::days(40)),
                ends_at: Set(now - chrono::Duration::days(10)),
                status: Set(SubscriptionStatus::Active),
                payment_order_ref: Set(None),
                created_at: Set(now - chrono::Duration::days(40)),
                updated_at: Set(now - chrono::Duration::days(40)),
                ..Default::default()
            })
            .await
            .unwrap();

        SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn confirm_activates_once_and_notifies_with_plan_details() {
        let f = fixture().await;
        let notifier = RecordingNotifier::default();

        let (sub, _) = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap();

        let confirmed =
            SubscriptionService::confirm(&f.subs, &f.messes, &f.users, &notifier, &sub.uuid)
                .await
                .unwrap();
        assert_eq!(confirmed.status, SubscriptionStatus::Active);

        let sent = notifier.confirmations.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "asha@x.com");
        assert_eq!(sent[0].1.price, 500);
        assert_eq!(sent[0].1.plan_name, "Monthly Thali");
        assert_eq!(
            sent[0].1.ends_at - sent[0].1.starts_at,
            chrono::Duration::days(30)
        );
        drop(sent);

        // Second confirm is a CAS miss
        let err = SubscriptionService::confirm(&f.subs, &f.messes, &f.users, &notifier, &sub.uuid)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(notifier.confirmations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirm_unknown_subscription_is_not_found() {
        let f = fixture().await;
        let notifier = RecordingNotifier::default();
        let err = SubscriptionService::confirm(&f.subs, &f.messes, &f.users, &notifier, "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn cancel_is_owner_only_and_active_only() {
        let f = fixture().await;
        let notifier = RecordingNotifier::default();

        let (sub, _) = SubscriptionService::initiate(
            &f.subs,
            &f.messes,
            &StubGateway,
            &f.consumer,
            f.mess_id,
            f.plan_id,
        )
        .await
        .unwrap();

        // Not yet active
        let err = SubscriptionService::cancel(&f.subs, &f.consumer, &sub.uuid)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        SubscriptionService::confirm(&f.subs, &f.messes, &f.users, &notifier, &sub.uuid)
            .await
            .unwrap();

        // Provider role is rejected outright
        let err = SubscriptionService::cancel(&f.subs, &f.provider, &sub.uuid)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // A different consumer is rejected
        let other =
            UserService::create_user(&f.users, "Omar", "omar@x.com", "hunter2pass", Role::Consumer)
                .await
                .unwrap();
        let err = SubscriptionService::cancel(&f.subs, &other, &sub.uuid)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // The owner succeeds, exactly once
        SubscriptionService::cancel(&f.subs, &f.consumer, &sub.uuid)
            .await
            .unwrap();
        let err = SubscriptionService::cancel(&f.subs, &f.consumer, &sub.uuid)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = f.subs.find_by_uuid(&sub.uuid).await.unwrap().unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Cancelled);
    }
}
