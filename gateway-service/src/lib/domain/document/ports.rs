use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;

use crate::document::errors::DocumentError;

/// Generic CRUD persistence over named collections of JSON documents.
///
/// Collections and document schema are whatever the backing store holds;
/// the router dispatches requests verbatim. Every document carries a
/// string-comparable `id` field.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Snapshot of the entire database: collection name to document list.
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Store operation failed
    async fn snapshot(&self) -> Result<Map<String, Value>, DocumentError>;

    /// List all documents in a collection. Unknown collections are empty.
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Store operation failed
    async fn list(&self, collection: &str) -> Result<Vec<Value>, DocumentError>;

    /// Fetch one document by id.
    ///
    /// # Returns
    /// Optional document (None if not found)
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Store operation failed
    async fn find(&self, collection: &str, id: &str) -> Result<Option<Value>, DocumentError>;

    /// Insert a document, assigning an `id` when the body has none.
    ///
    /// # Returns
    /// The stored document including its id
    ///
    /// # Errors
    /// * `InvalidDocument` - Body is not a JSON object
    /// * `AlreadyExists` - Supplied id is already taken
    /// * `Io` / `Serialization` - Store operation failed
    async fn insert(&self, collection: &str, document: Value) -> Result<Value, DocumentError>;

    /// Replace a document wholesale, keeping its id.
    ///
    /// # Errors
    /// * `NotFound` - Document does not exist
    /// * `InvalidDocument` - Body is not a JSON object
    /// * `Io` / `Serialization` - Store operation failed
    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<Value, DocumentError>;

    /// Shallow-merge a patch into a document.
    ///
    /// # Errors
    /// * `NotFound` - Document does not exist
    /// * `InvalidDocument` - Patch is not a JSON object
    /// * `Io` / `Serialization` - Store operation failed
    async fn merge(&self, collection: &str, id: &str, patch: Value)
        -> Result<Value, DocumentError>;

    /// Delete a document.
    ///
    /// # Errors
    /// * `NotFound` - Document does not exist
    /// * `Io` / `Serialization` - Store operation failed
    async fn remove(&self, collection: &str, id: &str) -> Result<(), DocumentError>;
}
