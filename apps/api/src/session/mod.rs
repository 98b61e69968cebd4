//! The editing session: one owned Document plus the two preference flags.
//!
//! The Document is never mutated in place. Every edit computes a complete
//! replacement from the current value, swaps it in under the write lock and
//! persists it before the lock is released, so stored writes land in edit order.
//! Store failures are logged and otherwise ignored.

pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::document::merge;
use crate::models::document::Document;
use crate::models::preferences::Theme;
use crate::store::{KeyValueStore, DOCUMENT_KEY, ONBOARDING_KEY, THEME_KEY};

pub struct Session {
    document: RwLock<Arc<Document>>,
    theme: RwLock<Theme>,
    onboarding_seen: AtomicBool,
    exporting: Arc<AtomicBool>,
    last_export: Mutex<Option<ExportRecord>>,
    defaults: Document,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Reads the three keys once and reconciles the stored Document against `defaults`.
    pub async fn load(store: Arc<dyn KeyValueStore>, defaults: Document) -> Self {
        let stored = read_key(store.as_ref(), DOCUMENT_KEY).await;
        let document = merge(&defaults, stored.as_deref());
        let theme = Theme::from_stored(read_key(store.as_ref(), THEME_KEY).await.as_deref());
        let onboarding_seen = read_key(store.as_ref(), ONBOARDING_KEY).await.as_deref() == Some("true");

        info!(
            "Session loaded from {} store (stored document: {}, theme: {})",
            store.backend(),
            stored.is_some(),
            theme.as_str()
        );

        Session {
            document: RwLock::new(Arc::new(document)),
            theme: RwLock::new(theme),
            onboarding_seen: AtomicBool::new(onboarding_seen),
            exporting: Arc::new(AtomicBool::new(false)),
            last_export: Mutex::new(None),
            defaults,
            store,
        }
    }

    pub async fn document(&self) -> Arc<Document> {
        self.document.read().await.clone()
    }

    /// The built-in Document imports are reconciled against.
    pub fn defaults(&self) -> &Document {
        &self.defaults
    }

    /// Replaces the Document with the result of `edit`.
    ///
    /// On `Err` the current Document is left untouched and nothing is written.
    pub async fn update<F, E>(&self, edit: F) -> Result<Arc<Document>, E>
    where
        F: FnOnce(&Document) -> Result<Document, E>,
    {
        let mut current = self.document.write().await;
        let next = Arc::new(edit(&**current)?);
        *current = next.clone();

        match serde_json::to_string(next.as_ref()) {
            Ok(json) => self.persist(DOCUMENT_KEY, &json).await,
            Err(e) => warn!("Document could not be serialized for storage: {e}"),
        }
        Ok(next)
    }

    // ── Preferences ─────────────────────────────────────────────────────────

    pub async fn theme(&self) -> Theme {
        *self.theme.read().await
    }

    pub async fn set_theme(&self, theme: Theme) -> Theme {
        let mut current = self.theme.write().await;
        *current = theme;
        self.persist(THEME_KEY, theme.as_str()).await;
        theme
    }

    pub async fn toggle_theme(&self) -> Theme {
        let mut current = self.theme.write().await;
        *current = current.toggled();
        self.persist(THEME_KEY, current.as_str()).await;
        *current
    }

    pub fn onboarding_seen(&self) -> bool {
        self.onboarding_seen.load(Ordering::SeqCst)
    }

    /// Marks onboarding as seen. Only the first call writes to the store.
    pub async fn dismiss_onboarding(&self) {
        if !self.onboarding_seen.swap(true, Ordering::SeqCst) {
            self.persist(ONBOARDING_KEY, "true").await;
        }
    }

    // ── Export flag ─────────────────────────────────────────────────────────

    /// Claims the export flag. `None` while another export is running.
    pub fn begin_export(&self) -> Option<ExportGuard> {
        self.exporting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ExportGuard {
                flag: self.exporting.clone(),
            })
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    pub fn record_export(&self, outcome: ExportOutcome) {
        let record = ExportRecord {
            outcome,
            finished_at: Utc::now(),
        };
        match self.last_export.lock() {
            Ok(mut last) => *last = Some(record),
            Err(poisoned) => *poisoned.into_inner() = Some(record),
        }
    }

    pub fn export_status(&self) -> ExportStatus {
        let last = match self.last_export.lock() {
            Ok(last) => last.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        ExportStatus {
            exporting: self.is_exporting(),
            last_outcome: last.as_ref().map(|r| r.outcome),
            last_finished_at: last.map(|r| r.finished_at),
        }
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!("Failed to persist '{key}' to {} store: {e}", self.store.backend());
        }
    }
}

async fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read '{key}' from {} store: {e}", store.backend());
            None
        }
    }
}

/// Holds the export flag; clears it when dropped, on every exit path.
#[derive(Debug)]
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOutcome {
    Pdf,
    PrintFallback,
    Failed,
}

#[derive(Debug, Clone)]
struct ExportRecord {
    outcome: ExportOutcome,
    finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub exporting: bool,
    pub last_outcome: Option<ExportOutcome>,
    pub last_finished_at: Option<DateTime<Utc>>,
}
