use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `POST /:collection` — insert a document.
///
/// Assigns an `id` when the body carries none; responds `201 Created`
/// with the stored document.
pub async fn create_document(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state.documents.insert(&collection, body).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}
