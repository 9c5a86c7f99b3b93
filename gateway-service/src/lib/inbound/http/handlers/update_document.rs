use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `PUT /:collection/:id` — replace a document wholesale.
pub async fn replace_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let stored = state.documents.replace(&collection, &id, body).await?;
    Ok(Json(stored))
}

/// `PATCH /:collection/:id` — shallow-merge a patch into a document.
pub async fn merge_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let stored = state.documents.merge(&collection, &id, body).await?;
    Ok(Json(stored))
}
