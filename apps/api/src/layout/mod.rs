// Layout: the shared rendering contract, the per-template column adapters,
// the printable HTML page and the A4 page-break estimate.

pub mod font_metrics;
pub mod handlers;
pub mod html;
pub mod pagination;
pub mod policy;
pub mod templates;

pub use font_metrics::{a4_page_config, PageConfig};
