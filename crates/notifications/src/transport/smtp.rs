//! SMTP relay transport backed by `lettre`.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{build_message, MailTransport, OutgoingEmail, SendReceipt, TransportKind};
use crate::config::SmtpSettings;
use crate::error::EmailError;

/// Sends mail through a configured SMTP relay.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    /// Build a relay transport. Implicit TLS when `settings.secure`,
    /// STARTTLS otherwise. No connection is opened until the first send.
    pub fn new(settings: &SmtpSettings, from_address: &str) -> Result<Self, EmailError> {
        if settings.host.trim().is_empty() {
            return Err(EmailError::Unavailable("SMTP host is empty".into()));
        }
        let from = from_address.parse::<Mailbox>()?;

        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let mailer = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, EmailError> {
        let (message, message_id) = build_message(&self.from, email)?;
        self.mailer.send(message).await?;
        Ok(SendReceipt {
            message_id,
            transport: TransportKind::Smtp,
        })
    }
}
