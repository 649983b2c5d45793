//! Domain error taxonomy.
//!
//! Every service returns [`DomainError`]; the HTTP boundary maps each variant
//! to a fixed status code and never inspects messages.

use shared::jwt::JwtError;
use thiserror::Error;

/// PostgreSQL SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for check_violation.
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, invalid or expired token, or bad credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Valid identity with insufficient role or ownership.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lost booking race, duplicate registration or other state conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying storage failure.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{} not found", what))
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DomainError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => DomainError::Conflict("Resource already exists".into()),
                Some(FOREIGN_KEY_VIOLATION) => {
                    DomainError::NotFound("Referenced resource not found".into())
                }
                Some(CHECK_VIOLATION) => {
                    DomainError::Validation("Value violates a data constraint".into())
                }
                _ => DomainError::Persistence(err.to_string()),
            },
            _ => DomainError::Persistence(err.to_string()),
        }
    }
}

impl From<JwtError> for DomainError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => DomainError::Authentication("Token has expired".into()),
            JwtError::InvalidToken | JwtError::InvalidClaims => {
                DomainError::Authentication("Could not validate credentials".into())
            }
            JwtError::EncodingError(msg) | JwtError::InvalidKey(msg) => {
                DomainError::Persistence(format!("Token service failure: {}", msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_pool_errors_map_to_persistence() {
        let err: DomainError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[test]
    fn test_jwt_errors_map_to_authentication() {
        let expired: DomainError = JwtError::TokenExpired.into();
        let invalid: DomainError = JwtError::InvalidToken.into();
        let claims: DomainError = JwtError::InvalidClaims.into();
        assert!(matches!(expired, DomainError::Authentication(_)));
        assert!(matches!(invalid, DomainError::Authentication(_)));
        assert!(matches!(claims, DomainError::Authentication(_)));
    }

    #[test]
    fn test_not_found_helper() {
        let err = DomainError::not_found("Court");
        assert_eq!(err.to_string(), "Not found: Court not found");
    }
}
