//! Document handlers

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pastelink_domain::document::DocumentKind;
use tracing::{error, info};

use crate::{
    dto::document::{DocumentResponse, ErrorResponse, KeyResponse, ReadOptions},
    handlers::ApiError,
    upload, AppState,
};

const RAW_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";
const FALLBACK_FILE_TYPE: &str = "application/octet-stream";

/// Retrieve a text document wrapped in a JSON envelope
#[utoipa::path(
    get,
    path = "/documents/{key}",
    params(
        ("key" = String, Path, description = "Document key"),
        ReadOptions
    ),
    responses(
        (status = 200, description = "Document found", body = DocumentResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(options): Query<ReadOptions>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document = state
        .documents
        .get_text(&key, options.skip_expire)
        .await
        .map_err(ApiError::from_read)?;

    Ok(Json(DocumentResponse {
        data: document.text(),
        key: document.key().to_string(),
    }))
}

/// Retrieve a document's payload as plain text
#[utoipa::path(
    get,
    path = "/raw/{key}",
    params(
        ("key" = String, Path, description = "Document key"),
        ReadOptions
    ),
    responses(
        (status = 200, description = "Document found", body = String, content_type = "text/plain"),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn get_raw_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(options): Query<ReadOptions>,
) -> Result<Response, ApiError> {
    let data = state
        .documents
        .get_raw(&key, options.skip_expire)
        .await
        .map_err(ApiError::from_read)?;

    Ok(([(CONTENT_TYPE, RAW_CONTENT_TYPE)], data).into_response())
}

/// Retrieve a file document with its original content type
///
/// The stored type is sent back as-is, an empty one included. Only a type
/// that cannot be a header value is replaced by `application/octet-stream`.
#[utoipa::path(
    get,
    path = "/file/{key}",
    params(
        ("key" = String, Path, description = "Document key"),
        ReadOptions
    ),
    responses(
        (status = 200, description = "File found, served with its stored content type"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(options): Query<ReadOptions>,
) -> Result<Response, ApiError> {
    let (content_type, data) = state
        .documents
        .get_file(&key, options.skip_expire)
        .await
        .map_err(ApiError::from_read)?
        .into_parts();

    let content_type = HeaderValue::from_str(&content_type)
        .unwrap_or(HeaderValue::from_static(FALLBACK_FILE_TYPE));

    Ok((StatusCode::OK, [(CONTENT_TYPE, content_type)], data).into_response())
}

/// Store a text document
#[utoipa::path(
    post,
    path = "/documents",
    request_body(
        content = String,
        description = "Raw text body, or a multipart form with a `data` field or a file part",
        content_type = "text/plain"
    ),
    responses(
        (status = 200, description = "Document stored", body = KeyResponse),
        (status = 400, description = "Document exceeds maximum length", body = ErrorResponse),
        (status = 500, description = "Store or connection failure", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn post_document(State(state): State<AppState>, request: Request) -> Response {
    ingest(state, request, DocumentKind::Text).await
}

/// Store a file document
#[utoipa::path(
    post,
    path = "/file",
    request_body(
        content = Vec<u8>,
        description = "Multipart form with a file part; a flat body is stored without a content type",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "File stored", body = KeyResponse),
        (status = 400, description = "File exceeds maximum length", body = ErrorResponse),
        (status = 500, description = "Store or connection failure", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn post_file(State(state): State<AppState>, request: Request) -> Response {
    ingest(state, request, DocumentKind::File).await
}

async fn ingest(state: AppState, request: Request, kind: DocumentKind) -> Response {
    let upload = match upload::accumulate(request).await {
        Ok(upload) => upload,
        Err(err) => return ApiError::from_write(err).into_response(),
    };

    info!(size = upload.len(), kind = ?kind, "Received upload");

    match state.documents.ingest(upload, kind).await {
        Ok(key) => Json(KeyResponse {
            key: key.into_inner(),
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to add document");
            ApiError::from_write(err).into_response()
        }
    }
}
