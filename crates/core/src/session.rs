//! Session lifetime rules.
//!
//! Sessions carry a hard time-to-live anchored on `created_at`. Activity
//! (`last_activity`) is tracked for auditing but never extends the lifetime.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Days after creation at which a session is purged.
pub const SESSION_TTL_DAYS: i64 = 30;

/// The session time-to-live as a duration.
pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

/// Instant at which a session created at `created_at` expires.
pub fn expires_at(created_at: Timestamp) -> Timestamp {
    created_at + session_ttl()
}

/// Whether a session created at `created_at` has expired as of `now`.
pub fn is_expired(created_at: Timestamp, now: Timestamp) -> bool {
    now >= expires_at(created_at)
}

/// Sessions created at or before this instant are expired as of `now`.
pub fn expiry_cutoff(now: Timestamp) -> Timestamp {
    now - session_ttl()
}

/// Reject blank session tokens.
pub fn validate_token(token: &str) -> Result<(), CoreError> {
    if token.trim().is_empty() {
        return Err(CoreError::Validation("Session token is required".into()));
    }
    Ok(())
}
