use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `GET /:collection` — list all documents in a collection.
///
/// Unknown collections yield an empty array, matching the original facade.
pub async fn list_documents(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let documents = state.documents.list(&collection).await?;
    Ok(Json(documents))
}
