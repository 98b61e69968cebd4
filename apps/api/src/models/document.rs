//! The resume Document and its closed vocabularies.
//!
//! Wire format is camelCase JSON, identical to the save format written by earlier
//! releases of the editor, so stored payloads decode without a translation layer.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Closed vocabularies
// ────────────────────────────────────────────────────────────────────────────

/// One of the five reorderable collection sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Work,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    /// Canonical order. Kinds missing from a stored order are appended in this order.
    pub const CANONICAL: [SectionKind; 5] = [
        SectionKind::Work,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Work => "work",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|k| k.as_str() == token)
    }

    /// Printed heading for the section.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Work => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Certifications => "Certifications",
        }
    }

    /// Mandatory sections keep their heading even with an empty collection.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, SectionKind::Work | SectionKind::Education)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Classic,
    #[default]
    Modern,
    Creative,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Creative => "creative",
        }
    }
}

/// Typography selector. Serialized as the CSS class token the client applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    #[serde(rename = "font-sans")]
    Sans,
    #[serde(rename = "font-serif")]
    Serif,
    #[serde(rename = "font-display")]
    Display,
    #[serde(rename = "font-mono")]
    Mono,
}

impl FontChoice {
    pub const ALL: [FontChoice; 4] = [
        FontChoice::Sans,
        FontChoice::Serif,
        FontChoice::Display,
        FontChoice::Mono,
    ];

    pub fn css_class(&self) -> &'static str {
        match self {
            FontChoice::Sans => "font-sans",
            FontChoice::Serif => "font-serif",
            FontChoice::Display => "font-display",
            FontChoice::Mono => "font-mono",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FontChoice::Sans => "Modern Sans",
            FontChoice::Serif => "Classic Serif",
            FontChoice::Display => "Bold Display",
            FontChoice::Mono => "Tech Mono",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    /// Self-assessed proficiency, 0–100.
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub link: String,
}

/// An identity-bearing item of a collection section.
///
/// `id` is the only identity used for update/remove; position never is.
pub trait Entry: Clone + Default + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entry for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_entry!(
    WorkEntry,
    EducationEntry,
    SkillEntry,
    ProjectEntry,
    CertificationEntry
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub template: TemplateKind,
    pub accent_color: String,
    pub font_family: FontChoice,
    pub section_order: Vec<SectionKind>,
}

/// The complete resume: user data plus presentation selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub personal: PersonalInfo,
    pub work: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub meta: Meta,
}

impl Document {
    /// Number of entries backing a section.
    pub fn section_len(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Work => self.work.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::Skills => self.skills.len(),
            SectionKind::Projects => self.projects.len(),
            SectionKind::Certifications => self.certifications.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_tokens_round_trip() {
        for kind in SectionKind::CANONICAL {
            assert_eq!(SectionKind::from_token(kind.as_str()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert_eq!(SectionKind::from_token("awards"), None);
    }

    #[test]
    fn test_only_work_and_education_are_mandatory() {
        let mandatory: Vec<_> = SectionKind::CANONICAL
            .into_iter()
            .filter(|k| k.is_mandatory())
            .collect();
        assert_eq!(mandatory, vec![SectionKind::Work, SectionKind::Education]);
    }

    #[test]
    fn test_font_choice_serializes_as_css_class() {
        for font in FontChoice::ALL {
            let json = serde_json::to_value(font).unwrap();
            assert_eq!(json, serde_json::json!(font.css_class()));
        }
    }

    #[test]
    fn test_entry_missing_fields_decode_empty() {
        let entry: WorkEntry = serde_json::from_str(r#"{"id":"7","company":"Acme"}"#).unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.company, "Acme");
        assert_eq!(entry.end_date, "");
        assert!(!entry.current);
    }

    #[test]
    fn test_personal_uses_camel_case_keys() {
        let personal = PersonalInfo {
            full_name: "Ada".to_string(),
            job_title: "Engineer".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&personal).unwrap();
        assert_eq!(json["fullName"], "Ada");
        assert_eq!(json["jobTitle"], "Engineer");
    }
}
