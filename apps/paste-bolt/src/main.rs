//! PasteBolt - Document Service
//!
//! HTTP service storing text and binary documents under short random keys.
//! Documents live in a key-value store (in-memory or S3) that owns their expiry.

mod backend;
mod config;
mod dto;
mod handlers;
mod routes;
mod upload;

use anyhow::Result;
use pastelink_domain::document::DocumentService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backend::{KeyGeneratorBackend, StoreBackend};
use config::{AppConfig, LogFormat};

/// The concrete document service run by this binary
pub type Documents = DocumentService<StoreBackend, KeyGeneratorBackend>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<Documents>,
}

impl AppState {
    pub fn new(documents: Documents) -> Self {
        Self {
            documents: Arc::new(documents),
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    init_tracing(config.log_format);

    info!("Starting PasteBolt document service");
    info!(
        store = ?config.store,
        key_generator = ?config.key_generator,
        key_length = config.key_length,
        max_length = ?config.max_length,
        expire_seconds = ?config.expire_seconds,
        "Loaded configuration"
    );

    let store = StoreBackend::from_config(&config).await;
    let generator = KeyGeneratorBackend::from_config(&config)?;

    // Create document service
    let service = DocumentService::new(store, generator, config.document_config());

    // Create shared application state
    let state = AppState::new(service);

    // Build HTTP router
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
