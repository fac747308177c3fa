use crate::registry::RegistryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("zip (5-digit) is required")]
    InvalidInput,
    /// Registry unreachable or answered with a non-success status.
    #[error(transparent)]
    Upstream(RegistryError),
    /// Anything else, including registry payloads that fail to decode.
    #[error("{0}")]
    Internal(String),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            LookupError::InvalidInput => StatusCode::BAD_REQUEST,
            LookupError::Upstream(_) | LookupError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message reported in the `detail` field of a 500 response.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl From<RegistryError> for LookupError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::Decode(_) => Self::Internal(value.to_string()),
            other => Self::Upstream(other),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            LookupError::MethodNotAllowed | LookupError::InvalidInput => {
                json!({ "error": self.to_string() })
            }
            LookupError::Upstream(_) | LookupError::Internal(_) => {
                error!(error = %self, "therapist lookup failed");
                json!({ "error": "Internal error", "detail": self.detail() })
            }
        };

        (status, Json(body)).into_response()
    }
}
