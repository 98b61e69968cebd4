use bytes::Bytes;
use tracing::{error, info};

use crate::errors::AppError;
use crate::export::rasterizer::{RasterError, RasterOptions, Rasterizer};
use crate::layout::font_metrics::PageConfig;
use crate::layout::html::render_html;
use crate::layout::policy::plan_layout;
use crate::layout::templates::arrange;
use crate::session::{ExportOutcome, Session};

pub const NAME_REQUIRED: &str = "Please enter your name before exporting.";
pub const EXPORT_FAILED: &str = "PDF Export failed. Please try printing to PDF instead.";
pub const EXPORT_IN_PROGRESS: &str = "An export is already in progress";

#[derive(Debug)]
pub enum ExportArtifact {
    Pdf { filename: String, bytes: Bytes },
    /// No rasterizer: the client prints this page itself.
    PrintFallback { html: String },
}

/// Exports the current Document as a PDF.
///
/// The export flag is held for the whole call and released on every exit path.
pub async fn export_pdf(
    session: &Session,
    rasterizer: &dyn Rasterizer,
    page: &PageConfig,
) -> Result<ExportArtifact, AppError> {
    let doc = session.document().await;
    if doc.personal.full_name.trim().is_empty() {
        return Err(AppError::Validation(NAME_REQUIRED.to_string()));
    }

    let _guard = session
        .begin_export()
        .ok_or_else(|| AppError::Conflict(EXPORT_IN_PROGRESS.to_string()))?;

    let layout = arrange(&plan_layout(&doc), doc.meta.template);
    let html = render_html(&layout, &doc.meta.accent_color, doc.meta.font_family)?;
    let options = RasterOptions::for_document(&doc.personal.full_name, page);

    info!(
        "Exporting {} ({} template, {} bytes of HTML)",
        options.filename,
        doc.meta.template.as_str(),
        html.len()
    );

    match rasterizer.rasterize(&html, &options).await {
        Ok(bytes) => {
            session.record_export(ExportOutcome::Pdf);
            Ok(ExportArtifact::Pdf {
                filename: options.filename,
                bytes,
            })
        }
        Err(RasterError::Unavailable) => {
            info!("No rasterizer configured, falling back to print");
            session.record_export(ExportOutcome::PrintFallback);
            Ok(ExportArtifact::PrintFallback { html })
        }
        Err(e) => {
            error!("PDF export failed: {e}");
            session.record_export(ExportOutcome::Failed);
            Err(AppError::Export(EXPORT_FAILED.to_string()))
        }
    }
}
