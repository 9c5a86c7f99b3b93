use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::IdentityName;
use crate::domain::identity::ports::IdentityRepository;

/// In-memory credential store.
///
/// Backs the integration test suite and local runs without a database.
/// The RwLock makes token overwrites atomic with respect to concurrent
/// reads of the same identity.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<Uuid, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        if identities.values().any(|i| i.name == identity.name) {
            return Err(IdentityError::NameAlreadyExists(
                identity.name.as_str().to_string(),
            ));
        }

        identities.insert(identity.id.0, identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities.get(&id.0).cloned())
    }

    async fn find_by_name(&self, name: &IdentityName) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities.values().find(|i| &i.name == name).cloned())
    }

    async fn update_token(&self, id: &IdentityId, token: &str) -> Result<(), IdentityError> {
        let mut identities = self.identities.write().await;

        match identities.get_mut(&id.0) {
            Some(identity) => {
                identity.current_token = Some(token.to_string());
                Ok(())
            }
            None => Err(IdentityError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn identity(name: &str) -> Identity {
        Identity {
            id: IdentityId::new(),
            name: IdentityName::new(name.to_string()).unwrap(),
            current_token: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryIdentityRepository::new();

        let created = repository.create(identity("admin")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.name.as_str(), "admin");

        let name = IdentityName::new("admin".to_string()).unwrap();
        let by_name = repository.find_by_name(&name).await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let repository = InMemoryIdentityRepository::new();

        repository.create(identity("admin")).await.unwrap();
        let result = repository.create(identity("admin")).await;
        assert!(matches!(result, Err(IdentityError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_token_overwrites() {
        let repository = InMemoryIdentityRepository::new();

        let created = repository.create(identity("admin")).await.unwrap();

        repository.update_token(&created.id, "first").await.unwrap();
        repository.update_token(&created.id, "second").await.unwrap();

        let stored = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.current_token.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_update_token_missing_identity() {
        let repository = InMemoryIdentityRepository::new();

        let result = repository.update_token(&IdentityId::new(), "token").await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }
}
