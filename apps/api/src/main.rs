mod config;
mod document;
mod errors;
mod export;
mod layout;
mod models;
mod routes;
mod session;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::export::HttpRasterizer;
use crate::layout::a4_page_config;
use crate::models::defaults::sample_document;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;
use crate::store::{FileStore, KeyValueStore, MemoryStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize persistence
    let store = open_store(&config).await?;
    info!("Store initialized ({})", store.backend());

    // Load the session document (merged against the built-in sample)
    let session = Arc::new(Session::load(store, sample_document()).await);

    // Initialize rasterizer (print fallback when RASTERIZER_URL is unset)
    let rasterizer = HttpRasterizer::new(config.rasterizer_url.clone(), config.rasterizer_timeout)?;
    match rasterizer.endpoint() {
        Some(url) => info!("Rasterizer endpoint: {url}"),
        None => info!("No rasterizer configured, PDF export falls back to print"),
    }

    let page_config = a4_page_config();
    info!(
        "Page config: {} {}x{}mm, {} lines per page",
        page_config.paper,
        page_config.width_mm,
        page_config.height_mm,
        page_config.usable_height_lines()
    );

    // Build app state
    let state = AppState {
        session,
        rasterizer: Arc::new(rasterizer),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match &config.store {
        StoreBackend::File { dir } => Arc::new(FileStore::open(dir).await?),
        StoreBackend::Redis { url } => Arc::new(RedisStore::connect(url, &config.store_key_prefix).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
