pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::document::handlers as document;
use crate::export::handlers as export;
use crate::layout::handlers as preview;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/document", get(document::handle_get_document))
        .route("/api/v1/document/import", post(document::handle_import))
        .route("/api/v1/document/export", get(document::handle_export_json))
        .route("/api/v1/document/personal", patch(document::handle_set_personal))
        .route("/api/v1/document/meta", patch(document::handle_set_meta))
        .route(
            "/api/v1/document/sections/:kind/entries",
            post(document::handle_add_entry),
        )
        .route(
            "/api/v1/document/sections/:kind/entries/:id",
            patch(document::handle_update_entry).delete(document::handle_remove_entry),
        )
        .route(
            "/api/v1/document/section-order/relocate",
            post(document::handle_relocate_section),
        )
        .route("/api/v1/options", get(document::handle_get_options))
        // Preview
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/preview/html", get(preview::handle_preview_html))
        .route("/api/v1/preview/pages", get(preview::handle_preview_pages))
        // Export
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/status", get(export::handle_export_status))
        // Preferences
        .route(
            "/api/v1/preferences/theme",
            get(session::handle_get_theme).put(session::handle_put_theme),
        )
        .route(
            "/api/v1/preferences/theme/toggle",
            post(session::handle_toggle_theme),
        )
        .route("/api/v1/onboarding", get(session::handle_get_onboarding))
        .route(
            "/api/v1/onboarding/dismiss",
            post(session::handle_dismiss_onboarding),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::export::HttpRasterizer;
    use crate::layout::font_metrics::a4_page_config;
    use crate::models::defaults::sample_document;
    use crate::models::document::Document;
    use crate::session::Session;
    use crate::store::{KeyValueStore, MemoryStore, DOCUMENT_KEY};

    async fn test_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let session = Session::load(store.clone(), sample_document()).await;
        let rasterizer = HttpRasterizer::new(None, Duration::from_secs(1)).unwrap();
        let state = AppState {
            session: Arc::new(session),
            rasterizer: Arc::new(rasterizer),
            page_config: a4_page_config(),
        };
        (state, store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_document_returns_defaults_on_first_run() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(&app, Method::GET, "/api/v1/document", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc: Document = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(doc, sample_document());
    }

    #[tokio::test]
    async fn test_rejected_import_leaves_document_unchanged() {
        let (state, store) = test_state().await;
        let app = build_router(state.clone());
        let before = serde_json::to_string(state.session.document().await.as_ref()).unwrap();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/document/import")
            .body(Body::from(r#"{"personal":{"fullName":"X"}}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let after = serde_json::to_string(state.session.document().await.as_ref()).unwrap();
        assert_eq!(before, after);
        assert_eq!(store.get(DOCUMENT_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_import_replaces_and_persists() {
        let (state, store) = test_state().await;
        let app = build_router(state.clone());
        let payload = json!({
            "personal": { "fullName": "Imported" },
            "work": [{ "id": "a", "company": "Acme", "current": true }]
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/document/import")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc = state.session.document().await;
        assert_eq!(doc.personal.full_name, "Imported");
        assert_eq!(doc.work.len(), 1);
        assert!(doc.projects.is_empty());
        assert!(store.get(DOCUMENT_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_json_export_is_attachment_and_round_trips() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(&app, Method::GET, "/api/v1/document/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
        assert!(disposition.contains("resume.json"));
        let doc: Document = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(doc, sample_document());
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let (state, _) = test_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            Method::POST,
            "/api/v1/document/sections/certifications/entries",
            Some(json!({ "name": "CKA", "issuer": "CNCF" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["document"]["certifications"][0]["name"], "CKA");

        let uri = format!("/api/v1/document/sections/certifications/entries/{id}");
        let response = send(&app, Method::PATCH, &uri, Some(json!({ "date": "2024-05" }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["certifications"][0]["date"], "2024-05");

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["certifications"]
            .as_array()
            .unwrap()
            .is_empty());

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_entry_without_body() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(&app, Method::POST, "/api/v1/document/sections/skills/entries", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["document"]["skills"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_unknown_section_is_not_found() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(
            &app,
            Method::POST,
            "/api/v1/document/sections/hobbies/entries",
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_relocate_section() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(
            &app,
            Method::POST,
            "/api/v1/document/section-order/relocate",
            Some(json!({ "from": 0, "to": 2 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["meta"]["sectionOrder"],
            json!(["projects", "education", "work", "skills", "certifications"])
        );

        let response = send(
            &app,
            Method::POST,
            "/api/v1/document/section-order/relocate",
            Some(json!({ "from": 7, "to": 0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_personal_and_meta_validation() {
        let (state, _) = test_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/document/personal",
            Some(json!({ "field": "summary", "value": "x".repeat(501) })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/document/meta",
            Some(json!({ "accentColor": "#123456" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/document/meta",
            Some(json!({ "template": "classic", "fontFamily": "font-serif" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["meta"]["template"], "classic");
        assert_eq!(doc["meta"]["fontFamily"], "font-serif");
    }

    #[tokio::test]
    async fn test_preview_endpoints() {
        let (state, _) = test_state().await;
        let app = build_router(state);

        let response = send(&app, Method::GET, "/api/v1/preview?template=creative", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let preview = body_json(response).await;
        assert_eq!(preview["layout"]["template"], "creative");
        assert_eq!(preview["layout"]["columns"].as_array().unwrap().len(), 2);

        let response = send(&app, Method::GET, "/api/v1/preview/html", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Jordan Rivera"));

        let response = send(&app, Method::GET, "/api/v1/preview/pages", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["page_count"], 1);
    }

    #[tokio::test]
    async fn test_pdf_export_falls_back_to_print_without_rasterizer() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        let response = send(&app, Method::POST, "/api/v1/export/pdf", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-export-fallback"], "print");
        assert!(body_text(response).await.contains("<html"));

        let response = send(&app, Method::GET, "/api/v1/export/status", None).await;
        let status = body_json(response).await;
        assert_eq!(status["exporting"], false);
        assert_eq!(status["lastOutcome"], "print_fallback");
    }

    #[tokio::test]
    async fn test_pdf_export_requires_name() {
        let (state, _) = test_state().await;
        let app = build_router(state);
        send(
            &app,
            Method::PATCH,
            "/api/v1/document/personal",
            Some(json!({ "field": "fullName", "value": "" })),
        )
        .await;
        let response = send(&app, Method::POST, "/api/v1/export/pdf", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Please enter your name before exporting."
        );
    }

    #[tokio::test]
    async fn test_theme_and_onboarding() {
        let (state, _) = test_state().await;
        let app = build_router(state);

        let response = send(&app, Method::GET, "/api/v1/preferences/theme", None).await;
        assert_eq!(body_json(response).await["theme"], "light");

        let response = send(&app, Method::POST, "/api/v1/preferences/theme/toggle", None).await;
        assert_eq!(body_json(response).await["theme"], "dark");

        let response = send(
            &app,
            Method::PUT,
            "/api/v1/preferences/theme",
            Some(json!({ "theme": "light" })),
        )
        .await;
        assert_eq!(body_json(response).await["theme"], "light");

        let response = send(&app, Method::GET, "/api/v1/onboarding", None).await;
        assert_eq!(body_json(response).await["onboardingSeen"], false);
        send(&app, Method::POST, "/api/v1/onboarding/dismiss", None).await;
        let response = send(&app, Method::GET, "/api/v1/onboarding", None).await;
        assert_eq!(body_json(response).await["onboardingSeen"], true);
    }
}
