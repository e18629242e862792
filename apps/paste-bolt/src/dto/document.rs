//! DTOs for document endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Response body for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct KeyResponse {
    /// Key to retrieve the document with
    #[schema(example = "aBcD3fGh1J")]
    pub key: String,
}

/// Response body for a text document
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    /// Stored text
    #[schema(example = "hello world")]
    pub data: String,
    #[schema(example = "aBcD3fGh1J")]
    pub key: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Document not found.")]
    pub message: String,
}

/// Query options shared by every read endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadOptions {
    /// Read without extending the document's lifetime
    #[serde(default)]
    pub skip_expire: bool,
}
