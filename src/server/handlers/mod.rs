pub mod health;
pub mod metrics;
pub mod query;
pub mod stats;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{ClientError, ServiceError};

/// Wrapper that converts `ClientError` into an HTTP response.
pub struct ApiError(pub ClientError);

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    /// Caller mistakes the index rejected (bad dimension, bad filter, unknown
    /// index) keep their status; every other upstream failure is a bad gateway.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClientError::MissingCredential { .. } | ClientError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ClientError::Retrieval(ServiceError::Status { status: 400, .. }) => {
                StatusCode::BAD_REQUEST
            }
            ClientError::Retrieval(ServiceError::Status { status: 404, .. }) => {
                StatusCode::NOT_FOUND
            }
            ClientError::Retrieval(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": self.0.to_string(),
            "status": status.as_u16(),
        });
        (status, axum::Json(body)).into_response()
    }
}
