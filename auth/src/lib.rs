//! Token authentication utilities library
//!
//! Provides the token codec used by the gateway: signed, time-limited
//! JWT credentials bound to an identity. No persistence and no I/O live
//! here; the consuming service decides how issued tokens are stored and
//! revoked.
//!
//! # Examples
//!
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = codec.issue("identity-123", Duration::hours(5)).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "identity-123");
//! ```

pub mod jwt;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
