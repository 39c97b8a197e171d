//! Notification dispatcher.
//!
//! [`Notifier`] owns its mail transport. The transport starts uninitialized
//! and is built exactly once, either by an explicit [`Notifier::init`] at
//! startup or by the first send. Concurrent first sends wait on the same
//! initialization. A failed initialization leaves the notifier uninitialized
//! so a later call can try again.
//!
//! Delivery is best-effort: the send methods never return an error. They
//! log failures and report them through [`DeliveryOutcome`], which callers
//! are free to ignore.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::MailConfig;
use crate::emails::{self, EmailContext};
use crate::error::EmailError;
use crate::transport::{
    DefaultTransportProvider, MailTransport, OutgoingEmail, SendReceipt, TransportProvider,
};

/// Result of a single best-effort send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Sent(SendReceipt),
    /// The message was not sent; the failure has already been logged.
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent(_))
    }
}

/// Renders and sends transactional emails over a lazily built transport.
pub struct Notifier {
    config: MailConfig,
    provider: Box<dyn TransportProvider>,
    transport: OnceCell<Arc<dyn MailTransport>>,
}

impl Notifier {
    /// Create a notifier that picks SMTP or the sandbox from `config`.
    pub fn new(config: MailConfig) -> Self {
        Self::with_provider(config, DefaultTransportProvider)
    }

    /// Create a notifier with a custom transport provider.
    pub fn with_provider(config: MailConfig, provider: impl TransportProvider + 'static) -> Self {
        Self {
            config,
            provider: Box::new(provider),
            transport: OnceCell::new(),
        }
    }

    /// Create a notifier around an already built transport.
    pub fn with_transport(config: MailConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config,
            provider: Box::new(DefaultTransportProvider),
            transport: OnceCell::new_with(Some(transport)),
        }
    }

    pub fn config(&self) -> &MailConfig {
        &self.config
    }

    /// Whether the transport has been built.
    pub fn is_ready(&self) -> bool {
        self.transport.initialized()
    }

    /// Build the transport now instead of on the first send. Idempotent.
    pub async fn init(&self) -> Result<(), EmailError> {
        self.transport().await.map(|_| ())
    }

    async fn transport(&self) -> Result<&Arc<dyn MailTransport>, EmailError> {
        self.transport
            .get_or_try_init(|| async {
                let transport = self.provider.connect(&self.config).await?;
                tracing::debug!("Mail transport initialized");
                Ok::<_, EmailError>(transport)
            })
            .await
    }

    /// Send a rendered email. Never fails: errors are logged and returned as
    /// [`DeliveryOutcome::Failed`].
    pub async fn send_email(&self, email: OutgoingEmail) -> DeliveryOutcome {
        let result = match self.transport().await {
            Ok(transport) => transport.send(&email).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(receipt) => {
                tracing::info!(
                    to = %email.to,
                    subject = %email.subject,
                    message_id = %receipt.message_id,
                    "Notification email sent"
                );
                DeliveryOutcome::Sent(receipt)
            }
            Err(e) => {
                tracing::error!(
                    to = %email.to,
                    subject = %email.subject,
                    error = %e,
                    "Failed to send notification email"
                );
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Tell a requester their purchase order was approved or rejected.
    pub async fn send_po_approval_email(
        &self,
        to: &str,
        po_number: &str,
        status: &str,
        approver_name: &str,
        comments: Option<&str>,
    ) -> DeliveryOutcome {
        let email = emails::po_approval(&self.context(), po_number, status, approver_name, comments);
        self.send_email(email.to(to)).await
    }

    /// Alert finance that an invoice is overdue.
    pub async fn send_overdue_invoice_email(
        &self,
        to: &str,
        invoice_number: &str,
        vendor_name: &str,
        amount: f64,
        days_overdue: u32,
    ) -> DeliveryOutcome {
        let email = emails::overdue_invoice(
            &self.context(),
            invoice_number,
            vendor_name,
            amount,
            days_overdue,
        );
        self.send_email(email.to(to)).await
    }

    /// Warn a department about its budget utilization.
    pub async fn send_budget_alert_email(
        &self,
        to: &str,
        department: &str,
        utilization_percent: f64,
        spent_amount: f64,
        limit_amount: f64,
    ) -> DeliveryOutcome {
        let email = emails::budget_alert(
            &self.context(),
            department,
            utilization_percent,
            spent_amount,
            limit_amount,
        );
        self.send_email(email.to(to)).await
    }

    fn context(&self) -> EmailContext<'_> {
        EmailContext {
            frontend_url: &self.config.frontend_url,
            locale: self.config.locale,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
