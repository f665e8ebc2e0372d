//! Error types for gateway operations.

use rusqlite::ErrorCode;

/// Errors returned by [`crate::TodoGateway`] operations.
///
/// Driver failures are carried unchanged in [`GatewayError::Database`];
/// the gateway never retries or rewrites them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The database driver reported a failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A fetch by id matched no list.
    #[error("list not found: {0}")]
    ListNotFound(i64),
}

impl GatewayError {
    /// Returns `true` when a lookup matched no row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound(_))
    }

    /// Returns `true` when the driver rejected a statement because of a
    /// foreign key, not-null, or other constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}
