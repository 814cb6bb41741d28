//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::{Deserialize, Serialize};

/// JSON body returned for rejected requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ErrorBody {
    /// Body describing an inference failure
    pub fn from_inference(err: &InferenceError) -> Self {
        match err {
            InferenceError::Features(inner) => Self {
                kind: inner.kind().as_str().to_string(),
                field: Some(inner.field().to_string()),
                message: inner.to_string(),
            },
            other => Self {
                kind: "internal".to_string(),
                field: None,
                message: other.to_string(),
            },
        }
    }
}

/// Error returned by request handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Batch larger than the configured maximum
    pub fn batch_too_large(size: usize, max: usize) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            body: ErrorBody {
                kind: "batch_too_large".to_string(),
                field: Some("objects".to_string()),
                message: format!("Batch of {} exceeds the limit of {}", size, max),
            },
        }
    }
}

/// Status code for an inference failure
pub fn status_for(err: &InferenceError) -> StatusCode {
    match err {
        InferenceError::Features(inner) => StatusCode::from_u16(inner.kind().status_code())
            .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY),
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        Self {
            status: status_for(&err),
            body: ErrorBody::from_inference(&err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
