//! Error taxonomy for the data-access layer.
//!
//! Every repository and aggregate operation returns [`DbError`]. Driver errors are
//! classified on conversion so callers can tell a dead store apart from a rejected
//! write without digging into `sqlx` internals.

use thiserror::Error;

/// Main error type for crm-core operations
#[derive(Error, Debug)]
pub enum DbError {
    /// Targeted id has no matching row
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Caller-supplied field map or request rejected before reaching the store
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Pool could not hand out a connection, or the store is unreachable
    #[error("connectivity error: {reason}")]
    Connectivity { reason: String },

    /// Store rejected a write (uniqueness, foreign key, not-null, bad data)
    #[error("constraint violation [{code}]{}: {message}", constraint_suffix(.constraint))]
    ConstraintViolation {
        constraint: Option<String>,
        code: String,
        message: String,
    },

    /// Column type the record mapper does not know how to decode
    #[error("cannot decode column '{column}' of type {type_name}")]
    Decode { column: String, type_name: String },

    /// Any other driver error
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

/// Result type alias for crm-core operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn connectivity(reason: impl Into<String>) -> Self {
        Self::Connectivity {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" on {c}"))
        .unwrap_or_default()
}

/// SQLSTATE class 23 (integrity constraint) or 22 (data exception).
fn is_constraint_code(code: &str) -> bool {
    code.starts_with("23") || code.starts_with("22")
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::connectivity(err.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                if is_constraint_code(&code) {
                    Self::ConstraintViolation {
                        constraint: db_err.constraint().map(str::to_owned),
                        code,
                        message: db_err.message().to_owned(),
                    }
                } else {
                    Self::Database(sqlx::Error::Database(db_err))
                }
            }
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_connectivity() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::Connectivity { .. }));
    }

    #[test]
    fn io_failure_is_connectivity() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: DbError = sqlx::Error::Io(io).into();
        assert!(matches!(err, DbError::Connectivity { .. }));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn row_not_found_stays_database_error() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Database(_)));
    }

    #[test]
    fn constraint_codes() {
        assert!(is_constraint_code("23505"));
        assert!(is_constraint_code("23503"));
        assert!(is_constraint_code("22P02"));
        assert!(!is_constraint_code("42P01"));
        assert!(!is_constraint_code(""));
    }

    #[test]
    fn error_display() {
        let err = DbError::not_found("client", "abc");
        assert_eq!(err.to_string(), "not found: client 'abc'");
        assert!(err.is_not_found());

        let err = DbError::ConstraintViolation {
            constraint: Some("clients_email_key".to_string()),
            code: "23505".to_string(),
            message: "duplicate key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "constraint violation [23505] on clients_email_key: duplicate key"
        );

        let err = DbError::ConstraintViolation {
            constraint: None,
            code: "22P02".to_string(),
            message: "invalid input".to_string(),
        };
        assert_eq!(err.to_string(), "constraint violation [22P02]: invalid input");
    }
}
