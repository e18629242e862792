//! API routes

pub mod documents;

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::document::{DocumentResponse, ErrorResponse, KeyResponse},
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::documents::get_document,
        handlers::documents::get_raw_document,
        handlers::documents::get_file,
        handlers::documents::post_document,
        handlers::documents::post_file,
        health_handler
    ),
    components(
        schemas(KeyResponse, DocumentResponse, ErrorResponse)
    ),
    tags(
        (name = "documents", description = "Text document endpoints"),
        (name = "files", description = "Binary file endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "PasteBolt API",
        version = "0.1.0",
        description = "Paste-style document service: store text or files, get them back by key",
        contact(
            name = "PasteLink Team"
        )
    )
)]
pub struct ApiDoc;

/// Create the main application router
///
/// The body size limit of axum's extractors is lifted: the document service
/// enforces the configured maximum length itself.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(documents::routes())
        .route("/health", axum::routing::get(health_handler))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
