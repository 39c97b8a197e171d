//! Minimal user model; sessions hang off it.

use serde::Serialize;
use sqlx::FromRow;
use vendorpo_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub organization_id: Option<DbId>,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub organization_id: Option<DbId>,
    pub email: String,
    pub name: String,
}
