//! Shared error mapping from pool and Diesel failures to port errors.

use tracing::debug;

use super::pool::PoolError;

/// Convert a pool failure into a port's connection error.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Convert a Diesel failure into a port's query or connection error.
pub fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(String) -> E,
    C: Fn(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        other => query(other.to_string()),
    }
}

/// True when the error is a unique-constraint violation, optionally
/// restricted to a named constraint.
pub fn is_unique_violation(error: &diesel::result::Error, constraint: Option<&str>) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => match constraint {
            Some(name) => info.constraint_name() == Some(name),
            None => true,
        },
        _ => false,
    }
}
