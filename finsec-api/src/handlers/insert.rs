use crate::handlers::ApiError;
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

/// `GET /insert/{data}` — append the path segment to the data log.
///
/// The segment is taken verbatim; the store applies no escaping beyond what
/// JSON serialization of the response already guarantees. A failed append
/// surfaces as 500 with a `detail` message and is not retried.
pub async fn insert_data(
    State(state): State<Arc<AppState>>,
    Path(data): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let timestamp = state.data_log.append(&data).map_err(|e| {
        error!(error = %e, "Data log append failed");
        ApiError::from(e)
    })?;

    Ok(Json(json!({
        "message": "Data stored successfully.",
        "inserted_data": data,
        "timestamp": timestamp,
        "file": state.data_log.path().display().to_string(),
    })))
}
