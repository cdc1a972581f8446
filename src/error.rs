//! Domain error taxonomy.
//!
//! Every operation fails fast with one of these kinds; the gateway layer
//! performs the single translation to HTTP status codes and never invents
//! business logic of its own.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, malformed, unsigned, or expired credential.
    #[error("missing or invalid credential")]
    Unauthorized,

    /// Known user, wrong password.
    #[error("invalid cpf or password")]
    InvalidCredentials,

    /// Authenticated but lacking privilege or ownership.
    #[error("insufficient privilege for this operation")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation on a natural key.
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("{0}")]
    BadRequest(String),

    /// Unexpected store or crypto failure. Logged by the gateway, surfaced
    /// to clients as an opaque failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => DomainError::Conflict(field),
            StoreError::Backend(msg) => DomainError::Internal(msg),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        assert_eq!(
            DomainError::from(StoreError::Duplicate { field: "cpf" }),
            DomainError::Conflict("cpf")
        );
        assert_eq!(
            DomainError::from(StoreError::Backend("boom".to_string())),
            DomainError::Internal("boom".to_string())
        );
    }
}
