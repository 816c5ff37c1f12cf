use crate::handlers::ApiError;
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use finsec_core::{FinsecError, clock};
use serde_json::Value;
use std::sync::Arc;

/// `GET /read/{id}` — serve the canned document for `id`.
///
/// One handler covers every registered sample. Everything but the timestamp
/// is fixed data.
pub async fn read_sample(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, ApiError> {
    let doc = state
        .samples
        .get(id)
        .ok_or(FinsecError::SampleNotFound(id))?;
    Ok(Json(doc.render(&clock::now_stamp())))
}
