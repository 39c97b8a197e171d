//! Disposable in-process transport used when no SMTP relay is configured.
//!
//! Messages are assembled exactly as for SMTP, so address and MIME errors
//! still surface, then kept in memory instead of being delivered.

use std::sync::Mutex;

use async_trait::async_trait;
use lettre::message::Mailbox;

use super::{build_message, MailTransport, OutgoingEmail, SendReceipt, TransportKind};
use crate::error::EmailError;

/// A message captured by the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEmail {
    pub message_id: String,
    pub email: OutgoingEmail,
}

/// Captures outgoing mail in memory.
pub struct SandboxTransport {
    from: Mailbox,
    outbox: Mutex<Vec<CapturedEmail>>,
}

impl SandboxTransport {
    pub fn new(from_address: &str) -> Result<Self, EmailError> {
        Ok(Self {
            from: from_address.parse::<Mailbox>()?,
            outbox: Mutex::new(Vec::new()),
        })
    }

    /// Snapshot of everything captured so far, oldest first.
    pub fn messages(&self) -> Vec<CapturedEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl MailTransport for SandboxTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, EmailError> {
        let (message, message_id) = build_message(&self.from, email)?;

        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            message_id = %message_id,
            size_bytes = message.formatted().len(),
            "Sandbox transport captured email"
        );

        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(CapturedEmail {
                message_id: message_id.clone(),
                email: email.clone(),
            });

        Ok(SendReceipt {
            message_id,
            transport: TransportKind::Sandbox,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Budget Alert".to_string(),
            html: "<p>80%</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn captures_messages_in_order() {
        let sandbox = SandboxTransport::new("noreply@vendorpo.local").unwrap();
        let first = sandbox.send(&email("a@acme.test")).await.unwrap();
        sandbox.send(&email("b@acme.test")).await.unwrap();

        let captured = sandbox.messages();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].message_id, first.message_id);
        assert_eq!(captured[0].email.to, "a@acme.test");
        assert_eq!(captured[1].email.to, "b@acme.test");
    }

    #[tokio::test]
    async fn bad_recipient_is_not_captured() {
        let sandbox = SandboxTransport::new("noreply@vendorpo.local").unwrap();
        assert!(sandbox.send(&email("nobody")).await.is_err());
        assert!(sandbox.messages().is_empty());
    }
}
