use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use auth::TokenCodec;
use auth::TokenError;
use chrono::Duration;
use chrono::Utc;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::IdentityName;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;

/// Upper bound on any single credential store call. An elapsed timeout is
/// an infrastructure error (5xx), never an authentication failure.
const STORE_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Domain service implementation for the authenticator.
///
/// Bridges the token codec and the credential store: mints tokens bound to
/// identity records and validates presented tokens on protected requests.
pub struct IdentityService<R>
where
    R: IdentityRepository,
{
    repository: Arc<R>,
    codec: TokenCodec,
    token_ttl: Duration,
}

impl<R> IdentityService<R>
where
    R: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `codec` - Token codec configured with the process-wide secret
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(repository: Arc<R>, codec: TokenCodec, token_ttl: Duration) -> Self {
        Self {
            repository,
            codec,
            token_ttl,
        }
    }

    async fn with_store_timeout<T>(
        &self,
        operation: impl Future<Output = Result<T, IdentityError>> + Send,
    ) -> Result<T, IdentityError> {
        tokio::time::timeout(STORE_TIMEOUT, operation)
            .await
            .map_err(|_| IdentityError::Timeout("credential store call timed out".to_string()))?
    }

    fn mint_token(&self, id: &IdentityId) -> Result<String, IdentityError> {
        self.codec
            .issue(&id.to_string(), self.token_ttl)
            .map_err(|e| IdentityError::IssuanceFailed(e.to_string()))
    }
}

#[async_trait]
impl<R> IdentityServicePort for IdentityService<R>
where
    R: IdentityRepository,
{
    async fn issue_for_name(&self, name: IdentityName) -> Result<Identity, IdentityError> {
        let existing = self
            .with_store_timeout(self.repository.find_by_name(&name))
            .await?;

        match existing {
            Some(mut identity) => {
                let token = self.mint_token(&identity.id)?;
                self.with_store_timeout(self.repository.update_token(&identity.id, &token))
                    .await?;
                identity.current_token = Some(token);
                Ok(identity)
            }
            None => {
                let id = IdentityId::new();
                let token = self.mint_token(&id)?;
                let identity = Identity {
                    id,
                    name,
                    current_token: Some(token),
                    created_at: Utc::now(),
                };
                self.with_store_timeout(self.repository.create(identity))
                    .await
            }
        }
    }

    async fn authorize(&self, presented_token: &str) -> Result<Identity, IdentityError> {
        // Independent cryptographic verification first: signature + expiry.
        let claims = self.codec.verify(presented_token).map_err(|e| match e {
            TokenError::Expired => IdentityError::TokenRejected("token expired".to_string()),
            _ => IdentityError::TokenRejected(e.to_string()),
        })?;

        // Keyed lookup by the identity claimed inside the token.
        let id = IdentityId::from_string(&claims.sub)
            .map_err(|e| IdentityError::TokenRejected(e.to_string()))?;

        let identity = self
            .with_store_timeout(self.repository.find_by_id(&id))
            .await?
            .ok_or_else(|| IdentityError::TokenRejected("unknown identity".to_string()))?;

        // Revocation check: only the most recently issued token is current.
        if identity.current_token.as_deref() != Some(presented_token) {
            return Err(IdentityError::TokenRejected(
                "token is not the identity's current token".to_string(),
            ));
        }

        Ok(identity)
    }
}
