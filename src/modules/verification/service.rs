use super::store::{CodeStore, normalize_subject};
use crate::modules::notifications::email::Notifier;
use crate::shared::error::{AppError, AppResult};

pub struct VerificationService;

impl VerificationService {
    /// Issues a fresh code for the subject and mails it. Any previously
    /// outstanding code for the subject is superseded.
    pub async fn request_code(
        store: &dyn CodeStore,
        notifier: &dyn Notifier,
        email: &str,
        purpose: &str,
    ) -> AppResult<()> {
        let email = normalize_subject(email);
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if purpose.trim().is_empty() {
            return Err(AppError::BadRequest("Purpose is required".to_string()));
        }

        let code = store.issue(&email, purpose.trim()).await?;
        notifier.send_verification_code(&email, &code).await?;

        tracing::info!("Issued verification code for {}", email);
        Ok(())
    }

    /// Checks subject + code + purpose against the store WITHOUT consuming
    /// the entry. The two-phase signup UI verifies first, then submits the
    /// full form; the same code must validate again at account creation.
    pub async fn check_code(
        store: &dyn CodeStore,
        email: &str,
        code: &str,
        purpose: &str,
    ) -> AppResult<()> {
        let email = normalize_subject(email);
        if email.is_empty() || code.trim().is_empty() || purpose.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Email, code and purpose are required".to_string(),
            ));
        }

        let entry = store.lookup(&email).await?.ok_or(AppError::NotFound(
            "Verification code not found or expired".to_string(),
        ))?;

        if entry.purpose != purpose.trim() {
            return Err(AppError::BadRequest(
                "Verification code was issued for a different purpose".to_string(),
            ));
        }
        if entry.code != code.trim() {
            return Err(AppError::BadRequest(
                "Incorrect verification code".to_string(),
            ));
        }

        Ok(())
    }

    /// Removes the subject's code. Called only after the dependent account
    /// creation fully succeeded.
    pub async fn consume(store: &dyn CodeStore, email: &str) -> AppResult<()> {
        store.invalidate(&normalize_subject(email)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::notifications::email::testing::RecordingNotifier;
    use crate::modules::verification::store::{
        InMemoryCodeStore, PURPOSE_PROVIDER_SIGNUP,
    };
    use chrono::Duration;

    #[tokio::test]
    async fn request_code_issues_and_mails_the_same_code() {
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        VerificationService::request_code(&store, &notifier, "A@x.com", PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();

        let sent = notifier.codes.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a@x.com");

        let entry = store.lookup("a@x.com").await.unwrap().unwrap();
        assert_eq!(entry.code, sent[0].1);
    }

    #[tokio::test]
    async fn request_code_rejects_blank_or_mailless_subject() {
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        let err =
            VerificationService::request_code(&store, &notifier, "  ", PURPOSE_PROVIDER_SIGNUP)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err =
            VerificationService::request_code(&store, &notifier, "not-an-email", PURPOSE_PROVIDER_SIGNUP)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(notifier.codes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn check_code_is_idempotent_until_consumed() {
        let store = InMemoryCodeStore::new();
        let code = store.issue("a@x.com", PURPOSE_PROVIDER_SIGNUP).await.unwrap();

        VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
        // Verify does not consume; the same code still passes
        VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();

        VerificationService::consume(&store, "a@x.com").await.unwrap();
        let err =
            VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn check_code_rejects_wrong_code_and_wrong_purpose() {
        let store = InMemoryCodeStore::new();
        let code = store.issue("a@x.com", PURPOSE_PROVIDER_SIGNUP).await.unwrap();

        let wrong = if code == "000000" { "000001" } else { "000000" };
        let err =
            VerificationService::check_code(&store, "a@x.com", wrong, PURPOSE_PROVIDER_SIGNUP)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = VerificationService::check_code(&store, "a@x.com", &code, "password-reset")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        // Neither failure touched the entry
        VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn check_code_reports_expired_as_not_found() {
        let store = InMemoryCodeStore::new();
        let code = store.issue("a@x.com", PURPOSE_PROVIDER_SIGNUP).await.unwrap();

        store.advance(Duration::minutes(11));

        let err =
            VerificationService::check_code(&store, "a@x.com", &code, PURPOSE_PROVIDER_SIGNUP)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn reissue_invalidates_the_previous_code() {
        let store = InMemoryCodeStore::new();
        let notifier = RecordingNotifier::default();

        VerificationService::request_code(&store, &notifier, "a@x.com", PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
        VerificationService::request_code(&store, &notifier, "a@x.com", PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();

        let sent = notifier.codes.lock().unwrap();
        let (first, second) = (&sent[0].1, &sent[1].1);
        if first != second {
            let err = VerificationService::check_code(
                &store,
                "a@x.com",
                first,
                PURPOSE_PROVIDER_SIGNUP,
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
        VerificationService::check_code(&store, "a@x.com", second, PURPOSE_PROVIDER_SIGNUP)
            .await
            .unwrap();
    }
}
