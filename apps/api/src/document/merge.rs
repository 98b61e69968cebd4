//! Migration/Merge Engine — reconciles a stored payload against the current schema.
//!
//! The stored payload may come from any earlier release of the editor, may be missing
//! whole keys, and may be partly corrupt. The merge runs field by field so damage in one
//! field never costs the user the others.
//!
//! # Rules
//! - No payload, unparseable JSON, or a non-object root → the default, unchanged.
//! - `personal`: stored strings override the default key by key (an empty string is a
//!   value, an absent or null key is not).
//! - Collections: a present array is the user's data; absent or null means empty.
//!   The default's sample entries are never resurrected.
//! - Entries: decoded field by field. Null or wrong-typed fields take their empty value,
//!   skill levels are rounded and clamped to 0–100, and only non-object entries are dropped.
//! - `meta`: sub-keys merged independently; `sectionOrder` keeps the stored order and
//!   appends any kinds it lacks, in canonical order.
//!
//! The merge is pure. Entries that arrive without a usable id get one derived from
//! their collection and position, so repeated merges of the same payload agree.

use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::document::section_order::{is_complete, reconcile};
use crate::models::document::{
    CertificationEntry, Document, EducationEntry, Entry, Meta, PersonalInfo, ProjectEntry,
    SectionKind, SkillEntry, WorkEntry,
};
use crate::models::options::is_known_accent;

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Merges a stored, serialized document over `default`.
pub fn merge(default: &Document, stored: Option<&str>) -> Document {
    let Some(raw) = stored else {
        return default.clone();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => merge_value(default, &value),
        Err(e) => {
            warn!("Stored document is not valid JSON, using defaults: {e}");
            default.clone()
        }
    }
}

/// Merges an already-decoded payload over `default`.
pub fn merge_value(default: &Document, stored: &Value) -> Document {
    let Some(root) = stored.as_object() else {
        warn!("Stored document root is not an object, using defaults");
        return default.clone();
    };

    Document {
        personal: merge_personal(&default.personal, present(root, "personal")),
        work: merge_collection::<WorkEntry>(root, SectionKind::Work),
        education: merge_collection::<EducationEntry>(root, SectionKind::Education),
        skills: merge_collection::<SkillEntry>(root, SectionKind::Skills),
        projects: merge_collection::<ProjectEntry>(root, SectionKind::Projects),
        certifications: merge_collection::<CertificationEntry>(root, SectionKind::Certifications),
        meta: merge_meta(&default.meta, present(root, "meta")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field mergers
// ────────────────────────────────────────────────────────────────────────────

/// A key counts as present only when it exists and is not null.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn merge_personal(default: &PersonalInfo, stored: Option<&Value>) -> PersonalInfo {
    match stored {
        None => default.clone(),
        Some(Value::Object(fields)) => overlay_strings(default, fields, "personal"),
        Some(_) => {
            warn!("Stored 'personal' is not an object, using defaults");
            default.clone()
        }
    }
}

/// Overlays string-valued keys of `fields` onto the serialized form of `base`.
///
/// Only keys `base` already has are considered; values of the wrong type are ignored.
fn overlay_strings<T>(base: &T, fields: &Map<String, Value>, scope: &str) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Ok(Value::Object(mut merged)) = serde_json::to_value(base) else {
        return base.clone();
    };

    for (key, slot) in merged.iter_mut() {
        match present(fields, key) {
            None => {}
            Some(Value::String(s)) => *slot = Value::String(s.clone()),
            Some(other) => {
                warn!("Ignoring stored '{scope}.{key}': expected a string, found {other}");
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|_| base.clone())
}

fn merge_collection<T: Entry>(root: &Map<String, Value>, kind: SectionKind) -> Vec<T> {
    match present(root, kind.as_str()) {
        None => Vec::new(),
        Some(Value::Array(items)) => decode_entries(items, kind),
        Some(_) => {
            warn!("Stored '{}' is not an array, treating as empty", kind.as_str());
            Vec::new()
        }
    }
}

/// Decodes entries one at a time, dropping non-objects and repairing ids.
fn decode_entries<T: Entry>(items: &[Value], kind: SectionKind) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        let Some(mut entry) = decode_entry::<T>(item, kind, position) else {
            continue;
        };

        if entry.id().is_empty() || seen.contains(entry.id()) {
            let repaired = derived_id(kind, position, &seen);
            warn!(
                "{} entry at position {position} has a missing or duplicate id, assigning '{repaired}'",
                kind.as_str()
            );
            entry.set_id(repaired);
        }
        seen.insert(entry.id().to_string());
        out.push(entry);
    }

    out
}

/// Decodes one entry field by field over `T::default()`.
///
/// Null or wrong-typed fields keep their empty value. Only a non-object entry is dropped.
fn decode_entry<T: Entry>(item: &Value, kind: SectionKind, position: usize) -> Option<T> {
    let Some(fields) = item.as_object() else {
        warn!(
            "Dropping {} entry at position {position}: expected an object, found {item}",
            kind.as_str()
        );
        return None;
    };
    let Ok(Value::Object(mut slots)) = serde_json::to_value(T::default()) else {
        return None;
    };

    for (key, slot) in slots.iter_mut() {
        let Some(stored) = present(fields, key) else {
            continue;
        };
        match coerce_field(key, slot, stored) {
            Some(value) => *slot = value,
            None => warn!(
                "Ignoring {}[{position}].{key}: unexpected value {stored}",
                kind.as_str()
            ),
        }
    }

    match serde_json::from_value(Value::Object(slots)) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Dropping {} entry at position {position}: {e}", kind.as_str());
            None
        }
    }
}

/// Converts a stored value to the shape of `slot`, or `None` when it cannot be used.
fn coerce_field(key: &str, slot: &Value, stored: &Value) -> Option<Value> {
    match (slot, stored) {
        (Value::String(_), Value::String(s)) => Some(Value::String(s.clone())),
        // Older saves may carry numeric ids; ids are opaque strings.
        (Value::String(_), Value::Number(n)) if key == "id" => Some(Value::String(n.to_string())),
        (Value::Bool(_), Value::Bool(b)) => Some(Value::Bool(*b)),
        // The only numeric entry field is a 0–100 skill level.
        (Value::Number(_), Value::Number(n)) => n
            .as_f64()
            .map(|level| Value::from(level.round().clamp(0.0, 100.0) as u8)),
        _ => None,
    }
}

fn derived_id(kind: SectionKind, position: usize, taken: &HashSet<String>) -> String {
    let base = format!("{}-{}", kind.as_str(), position + 1);
    if !taken.contains(&base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn merge_meta(default: &Meta, stored: Option<&Value>) -> Meta {
    let fields = match stored {
        None => None,
        Some(Value::Object(fields)) => Some(fields),
        Some(_) => {
            warn!("Stored 'meta' is not an object, using defaults");
            None
        }
    };
    let Some(fields) = fields else {
        return Meta {
            section_order: reconcile(&default.section_order),
            ..default.clone()
        };
    };

    let accent_color = match present(fields, "accentColor") {
        None => default.accent_color.clone(),
        Some(Value::String(color)) if is_known_accent(color) => color.clone(),
        Some(other) => {
            warn!("Ignoring unknown accent colour {other}");
            default.accent_color.clone()
        }
    };

    Meta {
        template: selector(fields, "template", default.template),
        accent_color,
        font_family: selector(fields, "fontFamily", default.font_family),
        section_order: merge_section_order(&default.section_order, present(fields, "sectionOrder")),
    }
}

/// Decodes a closed-set selector, falling back when absent or not a member.
fn selector<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str, fallback: T) -> T {
    match present(fields, key) {
        None => fallback,
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|_| {
            warn!("Ignoring unknown meta.{key} value {value}");
            fallback
        }),
    }
}

fn merge_section_order(default: &[SectionKind], stored: Option<&Value>) -> Vec<SectionKind> {
    let Some(Value::Array(tokens)) = stored else {
        return reconcile(default);
    };

    let known: Vec<SectionKind> = tokens
        .iter()
        .filter_map(|token| {
            let kind = token.as_str().and_then(SectionKind::from_token);
            if kind.is_none() {
                warn!("Dropping unknown section token {token}");
            }
            kind
        })
        .collect();

    if is_complete(&known) {
        return known;
    }
    let repaired = reconcile(&known);
    warn!("Stored section order was incomplete, repaired to {repaired:?}");
    repaired
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
