use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an issued token.
///
/// The token is self-contained: it binds a subject identity to an
/// issuance and expiry time. Nothing else is encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for an identity with expiry at `now + ttl`.
    pub fn for_identity(identity_id: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: identity_id.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }
}
