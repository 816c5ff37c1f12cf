pub mod health;
pub mod insert;
pub mod realtime;
pub mod samples;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use finsec_core::FinsecError;
use serde_json::json;

/// Maps [`FinsecError`] onto the service's JSON error shape: the mapped
/// status code with a `{"detail": <message>}` body.
pub struct ApiError(pub FinsecError);

impl From<FinsecError> for ApiError {
    fn from(err: FinsecError) -> Self {
        Self(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self(FinsecError::Io(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
