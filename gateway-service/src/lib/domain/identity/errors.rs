use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for IdentityName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityNameError {
    #[error("Identity name must not be empty")]
    Empty,

    #[error("Identity name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all identity and token-gate operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),

    #[error("Invalid identity name: {0}")]
    InvalidName(#[from] IdentityNameError),

    // Authentication failures: expected conditions, all rendered as a
    // uniform 401 so the gate leaks nothing about which check failed.
    #[error("Token rejected: {0}")]
    TokenRejected(String),

    // Domain-level errors
    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Identity name already exists: {0}")]
    NameAlreadyExists(String),

    // Token issuance failed for a non-auth reason (e.g. signing error)
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),

    // Infrastructure errors
    #[error("Credential store error: {0}")]
    DatabaseError(String),

    #[error("Credential store timeout: {0}")]
    Timeout(String),
}
