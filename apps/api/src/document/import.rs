//! Import of a user-supplied JSON file as the replacement Document.
//!
//! A payload is accepted only when it has a `personal` object and a `work` array.
//! Accepted payloads then pass through the merge engine, so an imported file ends up
//! exactly as it would after being saved and reloaded.

use serde_json::Value;
use thiserror::Error;

use crate::document::merge::merge_value;
use crate::models::document::Document;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("Error reading file: {0}")]
    NotJson(String),

    #[error("Invalid JSON file format: expected an object at the top level")]
    NotAnObject,

    #[error("Invalid JSON file format: missing 'personal' details")]
    MissingPersonal,

    #[error("Invalid JSON file format: missing 'work' history")]
    MissingWork,
}

/// Decodes and validates an import payload.
///
/// Never panics; every rejection is an `ImportError` value. The caller's current
/// Document is not consulted, so a rejection cannot disturb it.
pub fn import_document(default: &Document, payload: &str) -> Result<Document, ImportError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ImportError::NotJson(e.to_string()))?;
    check_shape(&value)?;
    Ok(merge_value(default, &value))
}

fn check_shape(value: &Value) -> Result<(), ImportError> {
    let root = value.as_object().ok_or(ImportError::NotAnObject)?;

    if !root.get("personal").is_some_and(Value::is_object) {
        return Err(ImportError::MissingPersonal);
    }
    if !root.get("work").is_some_and(Value::is_array) {
        return Err(ImportError::MissingWork);
    }
    Ok(())
}
