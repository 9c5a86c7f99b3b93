use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::document::errors::DocumentError;
use crate::identity::errors::IdentityError;

pub mod create_document;
pub mod delete_document;
pub mod get_db;
pub mod get_document;
pub mod issue_token;
pub mod list_documents;
pub mod update_document;

/// Body rejecting unauthenticated requests. Exact shape is wire compat
/// with the original facade.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                AUTHENTICATION_FAILED.to_string(),
            ),
        };

        (status, Json(ApiErrorBody { message })).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::TokenRejected(_) => ApiError::Unauthorized,
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            IdentityError::InvalidIdentityId(_) | IdentityError::InvalidName(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            IdentityError::Timeout(_) => ApiError::ServiceUnavailable(err.to_string()),
            IdentityError::IssuanceFailed(_) | IdentityError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DocumentError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            DocumentError::InvalidDocument(_) => ApiError::UnprocessableEntity(err.to_string()),
            DocumentError::Io(_) | DocumentError::Serialization(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}
