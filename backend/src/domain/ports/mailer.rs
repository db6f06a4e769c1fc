//! Port for outbound email.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailerError {
        /// The relay could not be reached.
        Transport { message: String } => "mail transport failed: {message}",
        /// The relay refused the message.
        Rejected { status: u16 } => "mail relay rejected message with status {status}",
    }
}

/// A plain-text message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers [`OutgoingMail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `mail`.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError>;
}
