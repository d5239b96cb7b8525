use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::error::TodoError;

/// JSON envelope for every todo response. Failures are reported through
/// `success: false` with a `message`; the HTTP status is always 200.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self { Self { success: true, message: None, data: Some(data) } }

    pub fn message(message: impl Into<String>) -> Self { Self { success: true, message: Some(message.into()), data: None } }

    pub fn failure(message: impl Into<String>) -> Self { Self { success: false, message: Some(message.into()), data: None } }
}

impl<T> From<TodoError> for ApiResponse<T> {
    fn from(err: TodoError) -> Self {
        if err.is_store() {
            tracing::error!(error = %err, "store operation failed");
        } else {
            tracing::debug!(error = %err, "rejected request");
        }
        Self::failure(err.to_string())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response { (StatusCode::OK, axum::Json(self)).into_response() }
}
