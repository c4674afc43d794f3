use async_trait::async_trait;

use crate::account::errors::MailerError;
use crate::account::ports::Mailer;

/// Notification dispatcher that writes structured log events instead of
/// sending real mail.
///
/// Real delivery is a deployment concern behind the [`Mailer`] port; this
/// implementation keeps the flow observable in development and tests.
pub struct TracingMailer {
    base_url: String,
}

impl TracingMailer {
    /// # Arguments
    /// * `base_url` - Public base URL used to render links in the log output
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailerError> {
        tracing::info!(
            recipient = %email,
            link = %format!("{}/api/auth/verify/{}", self.base_url, token),
            "Dispatching verification email"
        );
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), MailerError> {
        tracing::info!(
            recipient = %email,
            link = %format!("{}/api/auth/reset-password/{}", self.base_url, token),
            "Dispatching password reset email"
        );
        Ok(())
    }
}
