//! Document routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::documents::{get_document, get_file, get_raw_document, post_document, post_file},
    AppState,
};

/// Create document and file routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(post_document))
        .route("/documents/:key", get(get_document))
        .route("/raw/:key", get(get_raw_document))
        .route("/file", post(post_file))
        .route("/file/:key", get(get_file))
}
