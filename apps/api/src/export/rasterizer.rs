//! PDF rasterizer collaborator.
//!
//! The rasterizer turns the printable HTML snapshot into a PDF. It is an external
//! HTTP service; without a configured endpoint every request reports
//! `Unavailable` and the caller falls back to browser printing. No retries.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::layout::font_metrics::PageConfig;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("No rasterizer is configured")]
    Unavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rasterizer error (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Rasterizer returned an empty document")]
    EmptyBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub format: &'static str,
    pub quality: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOptions {
    pub unit: &'static str,
    pub format: &'static str,
    pub orientation: &'static str,
}

/// Capture settings sent along with the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    pub margin: f32,
    pub filename: String,
    pub image: ImageOptions,
    /// Capture scale relative to CSS pixels.
    pub scale: u8,
    pub use_cors: bool,
    pub page: PageOptions,
    pub width_mm: f32,
    /// Slightly under the page height so a full page never spills a blank second one.
    pub min_height_mm: f32,
}

impl RasterOptions {
    pub fn for_document(full_name: &str, page: &PageConfig) -> Self {
        RasterOptions {
            margin: 0.0,
            filename: pdf_filename(full_name),
            image: ImageOptions {
                format: "jpeg",
                quality: 0.98,
            },
            scale: 2,
            use_cors: true,
            page: PageOptions {
                unit: "mm",
                format: page.paper,
                orientation: "portrait",
            },
            width_mm: page.width_mm,
            min_height_mm: page.height_mm - 0.2,
        }
    }
}

/// `Jane Q Public` → `Jane_Q_Public_Resume.pdf`.
///
/// The result is safe inside a quoted `Content-Disposition` filename.
pub fn pdf_filename(full_name: &str) -> String {
    let stem: String = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-")
        .chars()
        .filter(|c| !matches!(c, '"' | ';') && !c.is_control())
        .collect();
    format!("{stem}_Resume.pdf")
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, html: &str, options: &RasterOptions) -> Result<Bytes, RasterError>;
}

#[derive(Debug, Serialize)]
struct RasterRequest<'a> {
    html: &'a str,
    options: &'a RasterOptions,
}

/// Posts the snapshot to an HTML-to-PDF service and returns the PDF body.
#[derive(Clone)]
pub struct HttpRasterizer {
    client: Client,
    endpoint: Option<String>,
}

impl HttpRasterizer {
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, RasterError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl Rasterizer for HttpRasterizer {
    async fn rasterize(&self, html: &str, options: &RasterOptions) -> Result<Bytes, RasterError> {
        let endpoint = self.endpoint.as_deref().ok_or(RasterError::Unavailable)?;

        let response = self
            .client
            .post(endpoint)
            .header("content-type", "application/json")
            .header("accept", "application/pdf")
            .json(&RasterRequest { html, options })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RasterError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(RasterError::EmptyBody);
        }
        debug!("Rasterizer returned {} bytes for {}", body.len(), options.filename);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::a4_page_config;

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("Jordan Rivera"), "Jordan_Rivera_Resume.pdf");
        assert_eq!(pdf_filename("  Ana   de la  Cruz "), "Ana_de_la_Cruz_Resume.pdf");
        assert_eq!(pdf_filename("A/B"), "A-B_Resume.pdf");
    }

    #[test]
    fn test_pdf_filename_strips_header_breaking_characters() {
        assert_eq!(
            pdf_filename("Dwayne \"The Rock\" Johnson"),
            "Dwayne_The_Rock_Johnson_Resume.pdf"
        );
        assert_eq!(pdf_filename("Lee; rm\u{7}"), "Lee_rm_Resume.pdf");
        let header = format!("attachment; filename=\"{}\"", pdf_filename("Zoë \"Z\" Ng"));
        assert!(axum::http::HeaderValue::from_str(&header).is_ok());
        assert_eq!(header.matches('"').count(), 2);
    }

    #[test]
    fn test_options_match_a4_capture_settings() {
        let options = RasterOptions::for_document("Jordan Rivera", &a4_page_config());
        assert_eq!(options.margin, 0.0);
        assert_eq!(options.scale, 2);
        assert_eq!(options.image.format, "jpeg");
        assert!((options.image.quality - 0.98).abs() < 1e-6);
        assert_eq!(options.page.format, "a4");
        assert_eq!(options.page.orientation, "portrait");
        assert!((options.width_mm - 210.0).abs() < 1e-4);
        assert!((options.min_height_mm - 296.8).abs() < 1e-3);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["image"]["type"], "jpeg");
        assert_eq!(json["useCors"], true);
        assert_eq!(json["filename"], "Jordan_Rivera_Resume.pdf");
    }

    #[tokio::test]
    async fn test_unconfigured_rasterizer_is_unavailable() {
        let rasterizer = HttpRasterizer::new(None, Duration::from_secs(1)).unwrap();
        let options = RasterOptions::for_document("A", &a4_page_config());
        let result = rasterizer.rasterize("<html></html>", &options).await;
        assert!(matches!(result, Err(RasterError::Unavailable)));
    }
}
