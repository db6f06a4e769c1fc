//! Mail adapters.
//!
//! `RelayMailer` posts each message as JSON to an HTTP mail relay.
//! `LogMailer` writes messages to the log and is used when no relay is
//! configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::info;

use crate::domain::ports::{Mailer, MailerError, OutgoingMail};

/// Mailer that hands messages to an HTTP relay.
pub struct RelayMailer {
    client: Client,
    endpoint: Url,
}

impl RelayMailer {
    /// Relay at `endpoint` with a whole-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(mail)
            .send()
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MailerError::rejected(status.as_u16()))
        }
    }
}

/// Mailer that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        info!(to = %mail.to, subject = %mail.subject, "mail relay not configured; logging message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn log_mailer_accepts_everything() {
        let mail = OutgoingMail {
            to: "owner@example.com".to_owned(),
            subject: "Habit reminder".to_owned(),
            body: "Time to complete your habit: Read".to_owned(),
        };
        assert!(LogMailer.send(&mail).await.is_ok());
    }

    #[rstest]
    fn outgoing_mail_serialises_as_relay_payload() {
        let mail = OutgoingMail {
            to: "owner@example.com".to_owned(),
            subject: "Habit reminder".to_owned(),
            body: "Time to complete your habit: Read".to_owned(),
        };
        let json = serde_json::to_value(&mail).expect("serialises");
        assert_eq!(json["to"], "owner@example.com");
        assert_eq!(json["subject"], "Habit reminder");
    }
}
