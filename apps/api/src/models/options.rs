//! Presentation selector sets offered to the client.

use serde::Serialize;

use crate::models::document::{FontChoice, TemplateKind};

/// Accent colour palette: (display name, hex value).
pub const PALETTE: &[(&str, &str)] = &[
    ("Blue", "#0ea5e9"),
    ("Emerald", "#10b981"),
    ("Violet", "#8b5cf6"),
    ("Rose", "#f43f5e"),
    ("Slate", "#475569"),
    ("Amber", "#f59e0b"),
];

pub fn is_known_accent(color: &str) -> bool {
    PALETTE.iter().any(|(_, value)| *value == color)
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedOption {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorOptions {
    pub colors: Vec<NamedOption>,
    pub fonts: Vec<NamedOption>,
    pub templates: Vec<&'static str>,
}

pub fn editor_options() -> EditorOptions {
    EditorOptions {
        colors: PALETTE
            .iter()
            .map(|&(name, value)| NamedOption { name, value })
            .collect(),
        fonts: FontChoice::ALL
            .iter()
            .map(|f| NamedOption {
                name: f.display_name(),
                value: f.css_class(),
            })
            .collect(),
        templates: TemplateKind::ALL.iter().map(|t| t.as_str()).collect(),
    }
}
