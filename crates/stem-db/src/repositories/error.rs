//! SQLx error conversion

use sqlx::Error as SqlxError;
use stem_core::error::DomainError;

/// Convert a SQLx error into an upstream datastore error
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => DomainError::DatabaseError("connection pool timed out".to_string()),
        other => DomainError::DatabaseError(other.to_string()),
    }
}

/// Map a unique-constraint violation to `on_unique`, anything else to `map_db_error`
pub fn map_unique_violation(e: SqlxError, on_unique: impl FnOnce() -> DomainError) -> DomainError {
    let is_unique = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if is_unique {
        on_unique()
    } else {
        map_db_error(e)
    }
}
