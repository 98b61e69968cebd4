use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::document::editor::{
    add_entry, apply_meta, move_section, remove_entry, set_personal_field, update_entry, MetaPatch,
    PersonalField,
};
use crate::document::import::import_document;
use crate::errors::AppError;
use crate::models::document::{Document, SectionKind};
use crate::models::options::{editor_options, EditorOptions};
use crate::state::AppState;

const EXPORT_FILENAME: &str = "resume.json";

#[derive(Debug, Deserialize)]
pub struct PersonalFieldRequest {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct RelocateRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Serialize)]
pub struct EntryCreated {
    pub id: String,
    pub document: Document,
}

fn section_kind(token: &str) -> Result<SectionKind, AppError> {
    SectionKind::from_token(token).ok_or_else(|| AppError::NotFound(format!("Unknown section '{token}'")))
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<Document> {
    Json(state.session.document().await.as_ref().clone())
}

/// POST /api/v1/document/import
/// Body is the raw text of the chosen file. Rejected payloads leave the Document as it was.
pub async fn handle_import(State(state): State<AppState>, body: String) -> Result<Json<Document>, AppError> {
    let session = &state.session;
    let doc = session
        .update(|_| import_document(session.defaults(), &body))
        .await?;
    info!("Imported document for '{}'", doc.personal.full_name);
    Ok(Json(doc.as_ref().clone()))
}

/// GET /api/v1/document/export
/// Downloads the current Document verbatim as `resume.json`.
pub async fn handle_export_json(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let doc = state.session.document().await;
    let body = serde_json::to_string_pretty(doc.as_ref()).map_err(anyhow::Error::from)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

/// PATCH /api/v1/document/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalFieldRequest>,
) -> Result<Json<Document>, AppError> {
    let doc = state
        .session
        .update(|doc| set_personal_field(doc, req.field, req.value))
        .await?;
    Ok(Json(doc.as_ref().clone()))
}

/// PATCH /api/v1/document/meta
pub async fn handle_set_meta(
    State(state): State<AppState>,
    Json(patch): Json<MetaPatch>,
) -> Result<Json<Document>, AppError> {
    let doc = state.session.update(|doc| apply_meta(doc, patch)).await?;
    Ok(Json(doc.as_ref().clone()))
}

/// POST /api/v1/document/sections/:kind/entries
/// Body fields are optional; an absent body adds a blank entry.
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let kind = section_kind(&kind)?;
    let fields = body.map(|Json(v)| v).unwrap_or_else(|| Value::Object(Default::default()));
    let id = uuid::Uuid::new_v4().to_string();

    let doc = state
        .session
        .update(|doc| add_entry(doc, kind, &fields, &id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntryCreated {
            id,
            document: doc.as_ref().clone(),
        }),
    ))
}

/// PATCH /api/v1/document/sections/:kind/entries/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<Json<Document>, AppError> {
    let kind = section_kind(&kind)?;
    let doc = state
        .session
        .update(|doc| update_entry(doc, kind, &id, &patch))
        .await?;
    Ok(Json(doc.as_ref().clone()))
}

/// DELETE /api/v1/document/sections/:kind/entries/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Document>, AppError> {
    let kind = section_kind(&kind)?;
    let doc = state
        .session
        .update(|doc| remove_entry(doc, kind, &id))
        .await?;
    Ok(Json(doc.as_ref().clone()))
}

/// POST /api/v1/document/section-order/relocate
pub async fn handle_relocate_section(
    State(state): State<AppState>,
    Json(req): Json<RelocateRequest>,
) -> Result<Json<Document>, AppError> {
    let doc = state
        .session
        .update(|doc| move_section(doc, req.from, req.to))
        .await?;
    Ok(Json(doc.as_ref().clone()))
}

/// GET /api/v1/options
pub async fn handle_get_options() -> Json<EditorOptions> {
    Json(editor_options())
}
