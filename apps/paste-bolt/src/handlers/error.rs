//! Translation of domain errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pastelink_domain::document::DocumentError;

use crate::dto::document::ErrorResponse;

const NOT_FOUND: &str = "Document not found.";
const TOO_LARGE: &str = "Document exceeds maximum length.";
const ADD_FAILED: &str = "Error adding document.";
const READ_FAILED: &str = "Error retrieving document.";
const CONNECTION: &str = "Connection error.";

/// An error response: a status code and a client-facing message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Map an error raised while ingesting a document
    pub fn from_write(err: DocumentError) -> Self {
        match err {
            DocumentError::PayloadTooLarge { .. } => Self::new(StatusCode::BAD_REQUEST, TOO_LARGE),
            DocumentError::ConnectionError(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, CONNECTION)
            }
            DocumentError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, NOT_FOUND),
            DocumentError::StorageFailure(_) | DocumentError::KeySpaceExhausted { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, ADD_FAILED)
            }
        }
    }

    /// Map an error raised while retrieving a document
    pub fn from_read(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, NOT_FOUND),
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, READ_FAILED),
        }
    }

    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message.to_string(),
            }),
        )
            .into_response()
    }
}
