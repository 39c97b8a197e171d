//! Mail transports.
//!
//! [`MailTransport`] is the seam the [`Notifier`](crate::Notifier) sends
//! through. [`SmtpMailTransport`] talks to a real relay; [`SandboxTransport`]
//! is the disposable stand-in used when no relay is configured.
//! [`TransportProvider`] decides which one to build on first use.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

use crate::config::MailConfig;
use crate::error::EmailError;

pub mod sandbox;
pub mod smtp;

pub use sandbox::SandboxTransport;
pub use smtp::SmtpMailTransport;

/// Domain used in generated `Message-ID` headers.
const MESSAGE_ID_DOMAIN: &str = "vendorpo.local";

/// A fully rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Which transport accepted a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Smtp,
    Sandbox,
}

/// Proof that a transport accepted a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: String,
    pub transport: TransportKind,
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, EmailError>;
}

/// Builds the transport the first time the dispatcher needs one.
#[async_trait]
pub trait TransportProvider: Send + Sync {
    async fn connect(&self, config: &MailConfig) -> Result<Arc<dyn MailTransport>, EmailError>;
}

/// Chooses SMTP when a relay with credentials is configured, the sandbox
/// otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTransportProvider;

#[async_trait]
impl TransportProvider for DefaultTransportProvider {
    async fn connect(&self, config: &MailConfig) -> Result<Arc<dyn MailTransport>, EmailError> {
        match &config.smtp {
            Some(settings) => {
                let transport = SmtpMailTransport::new(settings, &config.from_address)?;
                tracing::info!(
                    host = %settings.host,
                    port = settings.port,
                    secure = settings.secure,
                    "SMTP mail transport ready"
                );
                Ok(Arc::new(transport))
            }
            None => {
                let transport = SandboxTransport::new(&config.from_address)?;
                tracing::warn!(
                    "SMTP credentials not configured, provisioned sandbox mail transport; \
                     emails will be captured, not delivered"
                );
                Ok(Arc::new(transport))
            }
        }
    }
}

/// Assemble a MIME message with an HTML body and a fresh `Message-ID`.
pub(crate) fn build_message(
    from: &Mailbox,
    email: &OutgoingEmail,
) -> Result<(Message, String), EmailError> {
    let message_id = format!("<{}@{MESSAGE_ID_DOMAIN}>", uuid::Uuid::new_v4());
    let message = Message::builder()
        .from(from.clone())
        .to(email.to.parse::<Mailbox>()?)
        .subject(email.subject.as_str())
        .message_id(Some(message_id.clone()))
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| EmailError::Build(e.to_string()))?;
    Ok((message, message_id))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Overdue Invoice: INV-1".to_string(),
            html: "<p>hello</p>".to_string(),
        }
    }

    #[test]
    fn build_message_sets_headers() {
        let from: Mailbox = "PO Manager <noreply@vendorpo.local>".parse().unwrap();
        let (message, message_id) = build_message(&from, &sample("ap@acme.test")).unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: ap@acme.test"));
        assert!(raw.contains("Subject: Overdue Invoice: INV-1"));
        assert!(raw.contains("Content-Type: text/html"));
        assert!(raw.contains(&message_id));
        assert!(message_id.ends_with("@vendorpo.local>"));
    }

    #[test]
    fn build_message_rejects_bad_recipient() {
        let from: Mailbox = "noreply@vendorpo.local".parse().unwrap();
        let err = build_message(&from, &sample("not-an-email")).unwrap_err();
        assert_matches!(err, EmailError::Address(_));
    }

    #[tokio::test]
    async fn default_provider_falls_back_to_sandbox() {
        let transport = DefaultTransportProvider
            .connect(&MailConfig::default())
            .await
            .unwrap();
        let receipt = transport.send(&sample("ap@acme.test")).await.unwrap();
        assert_eq!(receipt.transport, TransportKind::Sandbox);
    }

    #[tokio::test]
    async fn default_provider_rejects_bad_sender() {
        let config = MailConfig {
            from_address: "not a mailbox".into(),
            ..MailConfig::default()
        };
        let result = DefaultTransportProvider.connect(&config).await;
        assert_matches!(result.err(), Some(EmailError::Address(_)));
    }
}
