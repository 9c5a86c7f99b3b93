use thiserror::Error;

/// Error type for token codec operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
