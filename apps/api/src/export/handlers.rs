use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::export::service::{export_pdf, ExportArtifact};
use crate::session::ExportStatus;
use crate::state::AppState;

pub const FALLBACK_HEADER: &str = "x-export-fallback";

/// POST /api/v1/export/pdf
/// Returns the PDF, or the printable HTML with `x-export-fallback: print`.
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let artifact = export_pdf(&state.session, state.rasterizer.as_ref(), &state.page_config).await?;

    Ok(match artifact {
        ExportArtifact::Pdf { filename, bytes } => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        ExportArtifact::PrintFallback { html } => ([(FALLBACK_HEADER, "print")], Html(html)).into_response(),
    })
}

/// GET /api/v1/export/status
pub async fn handle_export_status(State(state): State<AppState>) -> Json<ExportStatus> {
    Json(state.session.export_status())
}
