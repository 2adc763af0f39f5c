//! SMTP mail transport via lettre.

use std::str::FromStr;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox,
    transport::smtp::authentication::Credentials,
};

use gazette_core::ports::{MailError, MailMessage, Mailer};

/// SMTP transport configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Gazette <no-reply@example.com>`.
    pub from: String,
}

impl SmtpConfig {
    /// Read SMTP settings from the environment.
    ///
    /// Returns `None` when `SMTP_HOST` is unset, which disables real
    /// delivery in favor of the logging transport.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST")
            .ok()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);
        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| format!("Gazette <no-reply@{host}>"));

        Some(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }
}

/// Lettre-backed SMTP mailer.
pub struct SmtpMailer {
    from_mailbox: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let from_mailbox = Mailbox::from_str(&config.from)
            .map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        // Port 465 expects implicit TLS; everything else starts plain
        // and upgrades via STARTTLS.
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(config.username, config.password));
        }

        Ok(Self {
            from_mailbox,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let MailMessage { to, subject, body } = message;

        let to_mailbox =
            Mailbox::from_str(&to).map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        let email = Message::builder()
            .from(self.from_mailbox.clone())
            .to(to_mailbox)
            .subject(subject)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(to = %to, "Mail dispatched via SMTP");
        Ok(())
    }
}
