use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::IdentityIdError;
use crate::identity::errors::IdentityNameError;

/// Identity aggregate entity.
///
/// Represents a single authenticated principal. Exactly one token is
/// current per identity; re-issuance overwrites `current_token` and thereby
/// revokes the previous one.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub name: IdentityName,
    pub current_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity name value type
///
/// The lookup name for a principal. Non-empty, at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityName(String);

impl IdentityName {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid identity name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, IdentityNameError> {
        if name.is_empty() {
            return Err(IdentityNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(IdentityNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    /// Get the name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
