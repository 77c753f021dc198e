use crate::shared::config::Config;
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Everything the purchase-confirmation mail needs to say.
#[derive(Debug, Clone)]
pub struct PurchaseDetails {
    pub mess_name: String,
    pub plan_name: String,
    pub price: i64,
    pub starts_at: chrono::NaiveDateTime,
    pub ends_at: chrono::NaiveDateTime,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()>;
    async fn send_purchase_confirmation(
        &self,
        to: &str,
        details: &PurchaseDetails,
    ) -> AppResult<()>;
}

pub struct SmtpNotifier {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    app_env: String,
}

impl SmtpNotifier {
    pub fn new(config: &Config) -> Self {
        let app_env = config.app_env.clone();

        if app_env == "dev" || app_env == "test" {
            // In dev/test, we don't need actual mailer
            return Self {
                mailer: None,
                from: "dev@messmate.app".to_string(),
                app_env,
            };
        }

        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com")
            .expect("Failed to build mailer")
            .credentials(creds)
            .build();

        Self {
            mailer: Some(mailer),
            from: config.smtp_user.clone(),
            app_env,
        }
    }

    async fn deliver(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        if self.app_env == "dev" || self.app_env == "test" {
            println!("--------------------------------------------------");
            println!("[DEV] To: {}", to);
            println!("[DEV] Subject: {}", subject);
            println!("[DEV] {}", body);
            println!("--------------------------------------------------");
            return Ok(());
        }

        let email = Message::builder()
            .from(self.from.parse().map_err(|e| {
                AppError::InternalServerError(format!("Invalid from address: {}", e))
            })?)
            .to(to
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::InternalServerError(format!("Failed to build email: {}", e)))?;

        if let Some(mailer) = &self.mailer {
            mailer.send(email).await.map_err(|e| {
                AppError::InternalServerError(format!("Failed to send email: {}", e))
            })?;
        } else {
            return Err(AppError::InternalServerError(
                "Mailer not initialized in non-dev env".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.deliver(
            to,
            "MessMate Verification Code",
            format!("Your verification code is: {}", code),
        )
        .await
    }

    async fn send_purchase_confirmation(
        &self,
        to: &str,
        details: &PurchaseDetails,
    ) -> AppResult<()> {
        let body = format!(
            "Your subscription to {} is now active.\n\nPlan: {}\nPrice: {}\nValid: {} to {}",
            details.mess_name,
            details.plan_name,
            details.price,
            details.starts_at.date(),
            details.ends_at.date(),
        );
        self.deliver(to, "MessMate Subscription Confirmed", body).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn smtp_notifier_dev_mode_skips_transport() {
        let config = Config::for_tests();
        let notifier = SmtpNotifier::new(&config);
        assert!(notifier.mailer.is_none());

        let result = notifier
            .send_verification_code("test@example.com", "123456")
            .await;
        assert!(result.is_ok());
    }
}
