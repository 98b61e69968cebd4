use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::font_metrics::metrics_for;
use crate::layout::html::render_html;
use crate::layout::pagination::{paginate, PaginationReport};
use crate::layout::policy::{plan_layout, LayoutPlan};
use crate::layout::templates::{arrange, TemplateLayout};
use crate::models::document::{Document, TemplateKind};
use crate::state::AppState;

/// `?template=` previews another template without changing the Document.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<TemplateKind>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub plan: LayoutPlan,
    pub layout: TemplateLayout,
}

fn arranged(doc: &Document, query: &PreviewQuery) -> (LayoutPlan, TemplateLayout) {
    let plan = plan_layout(doc);
    let layout = arrange(&plan, query.template.unwrap_or(doc.meta.template));
    (plan, layout)
}

/// GET /api/v1/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Json<PreviewResponse> {
    let doc = state.session.document().await;
    let (plan, layout) = arranged(&doc, &query);
    Json(PreviewResponse { plan, layout })
}

/// GET /api/v1/preview/html
pub async fn handle_preview_html(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let doc = state.session.document().await;
    let (_, layout) = arranged(&doc, &query);
    Ok(Html(render_html(
        &layout,
        &doc.meta.accent_color,
        doc.meta.font_family,
    )?))
}

/// GET /api/v1/preview/pages
pub async fn handle_preview_pages(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Json<PaginationReport> {
    let doc = state.session.document().await;
    let (_, layout) = arranged(&doc, &query);
    Json(paginate(
        &layout,
        &state.page_config,
        &metrics_for(doc.meta.font_family),
    ))
}
