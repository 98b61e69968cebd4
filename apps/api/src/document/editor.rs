//! Editor operations.
//!
//! Each operation borrows the current Document and returns a complete replacement;
//! nothing is mutated in place. Entries are addressed by id only.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::section_order::relocate;
use crate::models::defaults::SUMMARY_MAX_CHARS;
use crate::models::document::{Document, Entry, FontChoice, SectionKind, TemplateKind};
use crate::models::options::is_known_accent;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("No {kind} entry with id '{id}'")]
    UnknownEntry { kind: &'static str, id: String },

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Section index {index} is out of range for {len} sections")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown accent colour '{0}'")]
    UnknownAccent(String),

    #[error("Summary is {actual} characters; the limit is {max}")]
    SummaryTooLong { actual: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    JobTitle,
    Email,
    Phone,
    Location,
    Website,
    Summary,
}

/// Partial update of the presentation selectors. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPatch {
    pub template: Option<TemplateKind>,
    pub accent_color: Option<String>,
    pub font_family: Option<FontChoice>,
}

// ────────────────────────────────────────────────────────────────────────────
// Personal & meta
// ────────────────────────────────────────────────────────────────────────────

pub fn set_personal_field(
    doc: &Document,
    field: PersonalField,
    value: String,
) -> Result<Document, EditError> {
    if field == PersonalField::Summary {
        let actual = value.chars().count();
        if actual > SUMMARY_MAX_CHARS {
            return Err(EditError::SummaryTooLong {
                actual,
                max: SUMMARY_MAX_CHARS,
            });
        }
    }

    let mut next = doc.clone();
    let personal = &mut next.personal;
    let slot = match field {
        PersonalField::FullName => &mut personal.full_name,
        PersonalField::JobTitle => &mut personal.job_title,
        PersonalField::Email => &mut personal.email,
        PersonalField::Phone => &mut personal.phone,
        PersonalField::Location => &mut personal.location,
        PersonalField::Website => &mut personal.website,
        PersonalField::Summary => &mut personal.summary,
    };
    *slot = value;
    Ok(next)
}

pub fn apply_meta(doc: &Document, patch: MetaPatch) -> Result<Document, EditError> {
    if let Some(color) = &patch.accent_color {
        if !is_known_accent(color) {
            return Err(EditError::UnknownAccent(color.clone()));
        }
    }

    let mut next = doc.clone();
    if let Some(template) = patch.template {
        next.meta.template = template;
    }
    if let Some(color) = patch.accent_color {
        next.meta.accent_color = color;
    }
    if let Some(font) = patch.font_family {
        next.meta.font_family = font;
    }
    Ok(next)
}

/// Drag-to-position move of a section. Indices are checked here, before the
/// unchecked controller runs.
pub fn move_section(doc: &Document, from: usize, to: usize) -> Result<Document, EditError> {
    let len = doc.meta.section_order.len();
    for index in [from, to] {
        if index >= len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
    }

    let mut next = doc.clone();
    next.meta.section_order = relocate(&doc.meta.section_order, from, to).into_owned();
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Collections
// ────────────────────────────────────────────────────────────────────────────

/// Runs a generic collection operation against the collection backing `$kind`,
/// returning a new Document with that collection replaced.
macro_rules! replace_collection {
    ($doc:expr, $kind:expr, $op:ident ( $($arg:expr),* )) => {{
        let doc: &Document = $doc;
        let mut next = doc.clone();
        match $kind {
            SectionKind::Work => next.work = $op(&doc.work, $kind, $($arg),*)?,
            SectionKind::Education => next.education = $op(&doc.education, $kind, $($arg),*)?,
            SectionKind::Skills => next.skills = $op(&doc.skills, $kind, $($arg),*)?,
            SectionKind::Projects => next.projects = $op(&doc.projects, $kind, $($arg),*)?,
            SectionKind::Certifications => {
                next.certifications = $op(&doc.certifications, $kind, $($arg),*)?
            }
        }
        next
    }};
}

/// Appends a new entry built from `fields`; missing fields start empty.
///
/// The id is supplied by the caller so this stays deterministic.
pub fn add_entry(
    doc: &Document,
    kind: SectionKind,
    fields: &Value,
    id: &str,
) -> Result<Document, EditError> {
    Ok(replace_collection!(doc, kind, appended(fields, id)))
}

/// Overlays `patch` onto the entry with `id`. The id itself cannot be changed.
pub fn update_entry(
    doc: &Document,
    kind: SectionKind,
    id: &str,
    patch: &Value,
) -> Result<Document, EditError> {
    Ok(replace_collection!(doc, kind, patched(id, patch)))
}

pub fn remove_entry(doc: &Document, kind: SectionKind, id: &str) -> Result<Document, EditError> {
    Ok(replace_collection!(doc, kind, without(id)))
}

fn appended<T: Entry>(
    list: &[T],
    kind: SectionKind,
    fields: &Value,
    id: &str,
) -> Result<Vec<T>, EditError> {
    if list.iter().any(|e| e.id() == id) {
        return Err(EditError::InvalidEntry(format!(
            "{} already has an entry with id '{id}'",
            kind.as_str()
        )));
    }

    let mut entry: T = match fields {
        Value::Null => T::default(),
        Value::Object(_) => {
            serde_json::from_value(fields.clone()).map_err(|e| EditError::InvalidEntry(e.to_string()))?
        }
        _ => {
            return Err(EditError::InvalidEntry(
                "entry fields must be an object".to_string(),
            ))
        }
    };
    entry.set_id(id.to_string());

    let mut next = list.to_vec();
    next.push(entry);
    Ok(next)
}

fn patched<T: Entry>(
    list: &[T],
    kind: SectionKind,
    id: &str,
    patch: &Value,
) -> Result<Vec<T>, EditError> {
    let position = find(list, kind, id)?;
    let Value::Object(changes) = patch else {
        return Err(EditError::InvalidEntry(
            "entry patch must be an object".to_string(),
        ));
    };

    let mut current =
        serde_json::to_value(&list[position]).map_err(|e| EditError::InvalidEntry(e.to_string()))?;
    if let Some(fields) = current.as_object_mut() {
        for (key, value) in changes.iter().filter(|(key, _)| key.as_str() != "id") {
            fields.insert(key.clone(), value.clone());
        }
    }

    let mut updated: T =
        serde_json::from_value(current).map_err(|e| EditError::InvalidEntry(e.to_string()))?;
    updated.set_id(id.to_string());

    let mut next = list.to_vec();
    next[position] = updated;
    Ok(next)
}

fn without<T: Entry>(list: &[T], kind: SectionKind, id: &str) -> Result<Vec<T>, EditError> {
    find(list, kind, id)?;
    Ok(list.iter().filter(|e| e.id() != id).cloned().collect())
}

fn find<T: Entry>(list: &[T], kind: SectionKind, id: &str) -> Result<usize, EditError> {
    list.iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| EditError::UnknownEntry {
            kind: kind.as_str(),
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::defaults::sample_document;
    use serde_json::json;

    #[test]
    fn test_set_personal_field_replaces_document() {
        let doc = sample_document();
        let next = set_personal_field(&doc, PersonalField::FullName, "Mira".to_string()).unwrap();
        assert_eq!(next.personal.full_name, "Mira");
        assert_eq!(doc.personal.full_name, sample_document().personal.full_name);
    }

    #[test]
    fn test_summary_length_limit() {
        let doc = sample_document();
        let long = "x".repeat(SUMMARY_MAX_CHARS + 1);
        assert_eq!(
            set_personal_field(&doc, PersonalField::Summary, long),
            Err(EditError::SummaryTooLong {
                actual: SUMMARY_MAX_CHARS + 1,
                max: SUMMARY_MAX_CHARS
            })
        );
        let exact = "x".repeat(SUMMARY_MAX_CHARS);
        assert!(set_personal_field(&doc, PersonalField::Summary, exact).is_ok());
    }

    #[test]
    fn test_add_entry_assigns_given_id_and_appends() {
        let doc = sample_document();
        let next = add_entry(
            &doc,
            SectionKind::Certifications,
            &json!({ "name": "AWS SAA", "issuer": "Amazon", "id": "ignored" }),
            "new-1",
        )
        .unwrap();
        assert_eq!(next.certifications.len(), 1);
        assert_eq!(next.certifications[0].id, "new-1");
        assert_eq!(next.certifications[0].issuer, "Amazon");
        assert_eq!(next.certifications[0].link, "");
    }

    #[test]
    fn test_add_blank_entry() {
        let doc = sample_document();
        let next = add_entry(&doc, SectionKind::Work, &Value::Null, "w-new").unwrap();
        let added = next.work.last().unwrap();
        assert_eq!(added.id, "w-new");
        assert_eq!(added.company, "");
        assert_eq!(next.work.len(), doc.work.len() + 1);
    }

    #[test]
    fn test_add_entry_rejects_duplicate_id() {
        let doc = sample_document();
        let err = add_entry(&doc, SectionKind::Skills, &json!({}), "1").unwrap_err();
        assert!(matches!(err, EditError::InvalidEntry(_)));
    }

    #[test]
    fn test_update_entry_by_id_not_position() {
        let doc = sample_document();
        let next = update_entry(
            &doc,
            SectionKind::Work,
            "2",
            &json!({ "company": "Renamed", "id": "hijack" }),
        )
        .unwrap();
        assert_eq!(next.work[1].company, "Renamed");
        assert_eq!(next.work[1].id, "2");
        assert_eq!(next.work[0], doc.work[0]);
    }

    #[test]
    fn test_update_entry_rejects_bad_field_type() {
        let doc = sample_document();
        let err = update_entry(&doc, SectionKind::Skills, "1", &json!({ "level": "high" }))
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidEntry(_)));
    }

    #[test]
    fn test_remove_entry() {
        let doc = sample_document();
        let next = remove_entry(&doc, SectionKind::Projects, "1").unwrap();
        assert_eq!(next.projects.len(), 1);
        assert_eq!(next.projects[0].id, "2");
    }

    #[test]
    fn test_unknown_entry_id() {
        let doc = sample_document();
        assert_eq!(
            remove_entry(&doc, SectionKind::Education, "missing"),
            Err(EditError::UnknownEntry {
                kind: "education",
                id: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_move_section_checks_bounds() {
        let doc = sample_document();
        assert_eq!(
            move_section(&doc, 0, 5),
            Err(EditError::IndexOutOfRange { index: 5, len: 5 })
        );
        let next = move_section(&doc, 0, 4).unwrap();
        assert_eq!(next.meta.section_order[4], SectionKind::Work);
    }

    #[test]
    fn test_apply_meta_validates_palette() {
        let doc = sample_document();
        let err = apply_meta(
            &doc,
            MetaPatch {
                accent_color: Some("#abcdef".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, EditError::UnknownAccent("#abcdef".to_string()));

        let next = apply_meta(
            &doc,
            MetaPatch {
                template: Some(TemplateKind::Creative),
                font_family: Some(FontChoice::Serif),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(next.meta.template, TemplateKind::Creative);
        assert_eq!(next.meta.font_family, FontChoice::Serif);
        assert_eq!(next.meta.accent_color, doc.meta.accent_color);
    }
}
