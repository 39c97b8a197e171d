//! User session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vendorpo_core::session;
use vendorpo_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(skip_serializing)]
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_active: bool,
    pub last_activity: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSession {
    /// When the TTL sweep will remove this session.
    pub fn expires_at(&self) -> Timestamp {
        session::expires_at(self.created_at)
    }

    /// Whether the hard TTL has elapsed as of `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        session::is_expired(self.created_at, now)
    }
}

/// DTO for opening a new session at login.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
