use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `DELETE /:collection/:id` — remove a document.
///
/// Responds `200` with an empty object (json-server wire compat).
pub async fn delete_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    state.documents.remove(&collection, &id).await?;
    Ok(Json(json!({})))
}
