//! Outbound mail transports.

mod smtp;

pub use smtp::{SmtpConfig, SmtpMailer};

use async_trait::async_trait;

use gazette_core::ports::{MailError, MailMessage, Mailer};

/// Fallback transport for setups without SMTP credentials: logs the
/// message instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "SMTP not configured; logging mail instead of sending"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_accepts_any_message() {
        let mailer = LogMailer;

        let result = mailer
            .send(MailMessage {
                to: "friend@example.com".to_string(),
                subject: "Hello".to_string(),
                body: "World".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }
}
