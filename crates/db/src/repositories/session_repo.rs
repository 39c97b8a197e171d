//! Repository for the `user_sessions` table.
//!
//! Sessions expire a fixed time after `created_at`
//! (see [`vendorpo_core::session`]). Lookups filter expired rows out even
//! before [`SessionRepo::purge_expired`] physically removes them. The lookup
//! cutoff is computed from the database clock, the same clock that stamps
//! `created_at`.

use sqlx::PgPool;
use vendorpo_core::session::{expiry_cutoff, validate_token, SESSION_TTL_DAYS};
use vendorpo_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token, ip_address, user_agent, is_active, \
                       last_activity, created_at, updated_at";

/// SQL predicate matching sessions still inside their TTL.
fn unexpired() -> String {
    format!("created_at > NOW() - make_interval(days => {SESSION_TTL_DAYS})")
}

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a session at login. `last_activity` starts at the creation instant.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, DbError> {
        validate_token(&input.token)?;

        let query = format!(
            "INSERT INTO user_sessions (user_id, token, ip_address, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.token)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await?;
        Ok(session)
    }

    /// Find an active, unexpired session by its token.
    pub async fn find_active_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE token = $1
               AND is_active = true
               AND {}",
            unexpired()
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// All active, unexpired sessions for a user, newest first.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1
               AND is_active = true
               AND {}
             ORDER BY created_at DESC, id DESC",
            unexpired()
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record activity on an active session. Does not extend its lifetime.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET last_activity = NOW()
             WHERE id = $1 AND is_active = true AND {}",
            unexpired()
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a single session inactive (logout). Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a user's sessions inactive. Returns the count of updated rows.
    pub async fn deactivate_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = false
             WHERE user_id = $1 AND is_active = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Hard-delete every session whose TTL has elapsed as of `now`,
    /// active or not. Returns the count of deleted rows.
    pub async fn purge_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE created_at <= $1")
            .bind(expiry_cutoff(now))
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
