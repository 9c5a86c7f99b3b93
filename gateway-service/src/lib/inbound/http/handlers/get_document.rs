use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `GET /:collection/:id` — fetch one document.
pub async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let document = state
        .documents
        .find(&collection, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Document not found: {}/{}", collection, id)))?;

    Ok(Json(document))
}
