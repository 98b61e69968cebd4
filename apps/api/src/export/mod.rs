// Export: JSON download of the Document and PDF export through the rasterizer,
// with the printable HTML as the fallback when no rasterizer is available.

pub mod handlers;
pub mod rasterizer;
pub mod service;

pub use rasterizer::{HttpRasterizer, Rasterizer};
