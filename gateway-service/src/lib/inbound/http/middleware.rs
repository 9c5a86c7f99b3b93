use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Header carrying the presented token (wire compat with the original facade).
pub const TOKEN_HEADER: &str = "token";

/// Extension type storing the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub name: String,
}

/// Access gate: admits or rejects every request to protected resources.
///
/// Extracts the presented token, delegates validation to the authenticator
/// (signature + expiry + stored-token revocation check keyed by the identity
/// claimed in the token), and forwards admitted requests. A request with no
/// token, an invalid token, or a superseded token gets a deterministic 401;
/// credential store failures surface as 5xx, never as 401.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let presented = extract_token_header(&req)?;

    let identity = state.identities.authorize(presented).await.map_err(|e| {
        match e {
            // Expected condition: log low, reveal nothing to the caller.
            IdentityError::TokenRejected(reason) => {
                tracing::debug!(reason = %reason, "Request rejected by access gate");
                ApiError::Unauthorized.into_response()
            }
            other => {
                tracing::error!(error = %other, "Access gate infrastructure failure");
                ApiError::from(other).into_response()
            }
        }
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        id: identity.id,
        name: identity.name.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_token_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(TOKEN_HEADER)
        .ok_or_else(|| ApiError::Unauthorized.into_response())?;

    header
        .to_str()
        .map_err(|_| ApiError::Unauthorized.into_response())
}
