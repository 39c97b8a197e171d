//! Mail configuration loaded from environment variables.

use std::fmt;

use vendorpo_core::money::Locale;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender mailbox when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "PO Manager <noreply@vendorpo.local>";

/// Default base URL for links embedded in emails.
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Connection settings for a real SMTP relay.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when `true`, STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for the notification dispatcher.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// `None` means no relay is configured and the sandbox transport is used.
    pub smtp: Option<SmtpSettings>,
    /// RFC 5322 "From" mailbox.
    pub from_address: String,
    /// Base URL of the web app, without a trailing slash.
    pub frontend_url: String,
    /// Locale used to format money amounts.
    pub locale: Locale,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            locale: Locale::default(),
        }
    }
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable       | Default                               |
    /// |----------------|---------------------------------------|
    /// | `SMTP_HOST`    | none (sandbox transport)              |
    /// | `SMTP_USER`    | none (sandbox transport)              |
    /// | `SMTP_PASS`    | none (sandbox transport)              |
    /// | `SMTP_PORT`    | `587`                                 |
    /// | `SMTP_SECURE`  | `false` (only `"true"` enables TLS)   |
    /// | `SMTP_FROM`    | `PO Manager <noreply@vendorpo.local>` |
    /// | `FRONTEND_URL` | `http://localhost:5173`               |
    /// | `MAIL_LOCALE`  | `en-US`                               |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let smtp = match (lookup("SMTP_HOST"), lookup("SMTP_USER"), lookup("SMTP_PASS")) {
            (Some(host), Some(user), Some(password)) if !host.trim().is_empty() => {
                Some(SmtpSettings {
                    host: host.trim().to_string(),
                    port: lookup("SMTP_PORT")
                        .and_then(|p| p.trim().parse().ok())
                        .unwrap_or(DEFAULT_SMTP_PORT),
                    secure: lookup("SMTP_SECURE").as_deref() == Some("true"),
                    user,
                    password,
                })
            }
            _ => None,
        };

        let locale = match lookup("MAIL_LOCALE") {
            Some(tag) => tag.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default mail locale");
                Locale::default()
            }),
            None => Locale::default(),
        };

        Self {
            smtp,
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            frontend_url: lookup("FRONTEND_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            locale,
        }
    }
}
