use vendorpo_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Error returned by repository write paths that validate input before
/// touching the database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Input rejected by a domain rule before any query ran.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A unique constraint (`uq_*`) rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl DbError {
    /// Classify a sqlx error, turning unique violations on `uq_*`
    /// constraints into [`DbError::Conflict`].
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return DbError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
            }
        }
        DbError::Database(err)
    }

    /// Whether this error is a unique-constraint conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DbError::Conflict(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_sqlx(err)
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => core,
            DbError::Conflict(msg) => CoreError::Conflict(msg),
            DbError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                CoreError::Internal("A database error occurred".into())
            }
        }
    }
}
