use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::document::errors::DocumentError;
use crate::domain::document::ports::DocumentStore;

/// Document store backed by a single flat JSON file.
///
/// The file is an object mapping collection names to arrays of documents.
/// The whole database is held in memory behind a RwLock and rewritten to
/// disk on every mutation (write to a temp file, then rename).
pub struct JsonFileDocumentStore {
    path: PathBuf,
    collections: RwLock<BTreeMap<String, Vec<Value>>>,
}

impl JsonFileDocumentStore {
    /// Open the store, loading the file when it exists.
    ///
    /// # Errors
    /// * `Io` - File could not be read
    /// * `Serialization` - File content is not an object of arrays
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();

        let collections = if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))?
        {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| DocumentError::Io(e.to_string()))?;
            parse_database(&bytes)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            collections: RwLock::new(collections),
        })
    }

    async fn persist(
        &self,
        collections: &BTreeMap<String, Vec<Value>>,
    ) -> Result<(), DocumentError> {
        let database: Map<String, Value> = collections
            .iter()
            .map(|(name, documents)| (name.clone(), Value::Array(documents.clone())))
            .collect();

        let bytes = serde_json::to_vec_pretty(&Value::Object(database))
            .map_err(|e| DocumentError::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, bytes)
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))?;

        Ok(())
    }
}

fn parse_database(bytes: &[u8]) -> Result<BTreeMap<String, Vec<Value>>, DocumentError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DocumentError::Serialization(e.to_string()))?;

    let Value::Object(database) = value else {
        return Err(DocumentError::Serialization(
            "database file must be a JSON object".to_string(),
        ));
    };

    database
        .into_iter()
        .map(|(name, documents)| match documents {
            Value::Array(documents) => Ok((name, documents)),
            _ => Err(DocumentError::Serialization(format!(
                "collection '{}' must be a JSON array",
                name
            ))),
        })
        .collect()
}

/// The `id` field of a document, normalized to a string. json-server data
/// uses both numeric and string ids.
fn document_id(document: &Value) -> Option<String> {
    match document.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn as_object(document: Value) -> Result<Map<String, Value>, DocumentError> {
    match document {
        Value::Object(fields) => Ok(fields),
        _ => Err(DocumentError::InvalidDocument(
            "document must be a JSON object".to_string(),
        )),
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn snapshot(&self) -> Result<Map<String, Value>, DocumentError> {
        let collections = self.collections.read().await;
        Ok(collections
            .iter()
            .map(|(name, documents)| (name.clone(), Value::Array(documents.clone())))
            .collect())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, DocumentError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find(&self, collection: &str, id: &str) -> Result<Option<Value>, DocumentError> {
        let collections = self.collections.read().await;
        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Ok(None),
        };

        Ok(documents
            .iter()
            .find(|d| document_id(d).as_deref() == Some(id))
            .cloned())
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<Value, DocumentError> {
        let mut fields = as_object(document)?;

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        let supplied_id = match fields.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        match supplied_id {
            Some(id) => {
                if documents.iter().any(|d| document_id(d).as_deref() == Some(id.as_str())) {
                    return Err(DocumentError::AlreadyExists {
                        collection: collection.to_string(),
                        id,
                    });
                }
            }
            None => {
                fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
            }
        }

        let stored = Value::Object(fields);
        documents.push(stored.clone());

        self.persist(&collections).await?;
        Ok(stored)
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<Value, DocumentError> {
        let mut fields = as_object(document)?;
        // The id in the path wins over any id in the body.
        fields.insert("id".to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let slot = documents
            .iter_mut()
            .find(|d| document_id(d).as_deref() == Some(id))
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        *slot = Value::Object(fields);
        let stored = slot.clone();

        self.persist(&collections).await?;
        Ok(stored)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Value, DocumentError> {
        let patch = as_object(patch)?;

        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let slot = documents
            .iter_mut()
            .find(|d| document_id(d).as_deref() == Some(id))
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let mut fields = as_object(slot.clone())?;
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            fields.insert(key, value);
        }

        *slot = Value::Object(fields);
        let stored = slot.clone();

        self.persist(&collections).await?;
        Ok(stored)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), DocumentError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let index = documents
            .iter()
            .position(|d| document_id(d).as_deref() == Some(id))
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        documents.remove(index);

        self.persist(&collections).await?;
        Ok(())
    }
}
