use crate::config::NotifyConfig;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build mail message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Notification transport
///
/// The run hands a composed subject and body to this trait; how they
/// reach the user is the implementation's business. Tests substitute a
/// recording double.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Sends notifications as mail over SMTP with STARTTLS
///
/// The from address doubles as the SMTP login user, which is how app
/// passwords on the common providers work.
pub struct SmtpNotifier {
    config: NotifyConfig,
}

impl SmtpNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let from: Mailbox = self.config.from_address.parse()?;
        let to: Mailbox = self.config.to_address.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .body(body.to_string())?;

        let credentials = Credentials::new(
            self.config.from_address.clone(),
            self.config.password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        mailer.send(message).await?;
        Ok(())
    }
}
