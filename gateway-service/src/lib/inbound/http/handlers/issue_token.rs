use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityName;
use crate::inbound::http::router::AppState;

/// `GET /auth` — mint a token for the configured identity (or the one
/// named in the query), creating the identity record if absent.
///
/// Responds `201 Created` with the identity record including the new
/// current token. Failures propagate as structured error responses.
pub async fn issue_token(
    State(state): State<AppState>,
    Query(query): Query<IssueTokenQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let name = match query.name {
        Some(name) => IdentityName::new(name)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
        None => state.default_identity.clone(),
    };

    let identity = state.identities.issue_for_name(name).await.map_err(|e| {
        tracing::error!(error = %e, "Token issuance failed");
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(IdentityResponseData::from(&identity)),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueTokenQuery {
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponseData {
    pub id: String,
    pub name: String,
    pub current_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.as_str().to_string(),
            current_token: identity.current_token.clone(),
            created_at: identity.created_at,
        }
    }
}
