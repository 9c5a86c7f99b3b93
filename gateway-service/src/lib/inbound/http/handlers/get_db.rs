use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// `GET /db` — full snapshot of the backing document database.
pub async fn get_db(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let snapshot = state.documents.snapshot().await?;
    Ok(Json(Value::Object(snapshot)))
}
