use std::sync::Arc;

use crate::export::Rasterizer;
use crate::layout::PageConfig;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Owns the Document and the preference flags.
    pub session: Arc<Session>,
    /// PDF rasterizer. `HttpRasterizer` in production; falls back to print when unconfigured.
    pub rasterizer: Arc<dyn Rasterizer>,
    /// A4 geometry used for pagination estimates and export capture settings.
    pub page_config: PageConfig,
}
