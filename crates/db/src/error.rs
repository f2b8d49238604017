//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),

    /// The database rejected a write (unique or foreign-key violation).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A second closure was attempted for the same service request.
    #[error("service request {0} is already closed")]
    AlreadyClosed(i32),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return Self::Constraint(db_err.message().to_owned());
            }
        }
        Self::Sqlx(err)
    }
}
