use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::IdentityName;

/// Port for the authenticator: token issuance and request authorization.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Issue a fresh token for the named identity, creating the identity
    /// record if it does not exist (find-or-create policy).
    ///
    /// Overwrites the identity's stored token: any previously issued token
    /// stops authenticating even while cryptographically valid.
    ///
    /// # Returns
    /// The identity including its new current token
    ///
    /// # Errors
    /// * `InvalidName` - Name fails validation
    /// * `IssuanceFailed` - Token signing failed
    /// * `DatabaseError` / `Timeout` - Credential store unavailable
    async fn issue_for_name(&self, name: IdentityName) -> Result<Identity, IdentityError>;

    /// Validate a presented token and resolve the identity it claims.
    ///
    /// Verifies signature and expiry first, then fetches the claimed
    /// identity from the credential store and checks the presented token
    /// against the stored current token (revocation check).
    ///
    /// # Errors
    /// * `TokenRejected` - Missing/forged/expired/revoked token, or the
    ///   claimed identity does not exist (uniform authentication failure)
    /// * `DatabaseError` / `Timeout` - Credential store unavailable
    async fn authorize(&self, presented_token: &str) -> Result<Identity, IdentityError>;
}

/// Persistence operations for the identity aggregate (the credential store).
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity record.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve an identity by name.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_name(&self, name: &IdentityName) -> Result<Option<Identity>, IdentityError>;

    /// Overwrite the identity's current token.
    ///
    /// The write must be atomic with respect to concurrent reads of the
    /// same identity: a reader observes either the old or the new token,
    /// never a partial value.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update_token(&self, id: &IdentityId, token: &str) -> Result<(), IdentityError>;
}
