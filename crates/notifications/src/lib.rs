//! Transactional email notifications.
//!
//! This crate provides:
//!
//! - [`MailConfig`]: SMTP and link settings loaded from the environment.
//! - [`emails`]: pure builders for the purchase-order, overdue-invoice, and
//!   budget-alert messages, wrapped by [`template::render_layout`].
//! - [`transport`]: the [`MailTransport`] seam with SMTP and sandbox
//!   implementations.
//! - [`Notifier`]: the dispatcher. It initializes its transport once, on
//!   first use or at startup, and never lets a delivery failure reach the
//!   caller.

pub mod config;
pub mod emails;
pub mod error;
pub mod notifier;
pub mod template;
pub mod transport;

pub use config::{MailConfig, SmtpSettings};
pub use emails::RenderedEmail;
pub use error::EmailError;
pub use notifier::{DeliveryOutcome, Notifier};
pub use transport::{MailTransport, OutgoingEmail, SendReceipt, TransportProvider};
