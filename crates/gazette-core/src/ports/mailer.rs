//! Outbound mail port.

use async_trait::async_trait;

/// A composed plain-text mail ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport trait. Delivery is fire-and-forget: implementations
/// hand the message to the transport and do not retry on failure.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message.
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Mail transport errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Message build error: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
