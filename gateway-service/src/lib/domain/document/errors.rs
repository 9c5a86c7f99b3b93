use thiserror::Error;

/// Error for document store operations
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    // Infrastructure errors
    #[error("Document store I/O error: {0}")]
    Io(String),

    #[error("Document serialization error: {0}")]
    Serialization(String),
}
