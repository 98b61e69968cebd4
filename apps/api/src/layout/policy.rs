//! Template Rendering Contract — the one layout policy every template consumes.
//!
//! # Rules
//! - Header and summary come first and are never reordered.
//! - Sections follow `meta.sectionOrder` exactly.
//! - Work and education always render their heading, even with no entries.
//!   Skills, projects and certifications are left out entirely when empty.
//! - Empty optional fields render as empty strings. A `current` entry ends in
//!   "Present" whatever its stored end date says.
//! - Every entry is one atomic print block; every heading keeps with the block after it.
//!
//! `plan_layout` is total: every Document, including ones with empty collections,
//! produces a plan.

use serde::Serialize;

use crate::models::document::{Document, FontChoice, SectionKind};

pub const PRESENT: &str = "Present";

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

/// How a block may be split across a page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakRule {
    /// Never split the block.
    Atomic,
    /// Never end a page with this block; it moves with the start of the next one.
    KeepWithNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub full_name: String,
    pub job_title: String,
    /// Only non-empty contact fields, in a fixed order.
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub text: String,
    pub break_rule: BreakRule,
}

/// Date information of an entry, already resolved against the `current` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Dates {
    None,
    Single { date: String },
    Range { start: String, end: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    Full,
    /// Keeps only the year part of `YYYY-MM` dates. "Present" is kept as is.
    YearOnly,
}

impl Dates {
    pub fn render(&self, style: DateStyle, separator: &str) -> String {
        let fmt = |s: &str| match style {
            DateStyle::Full => s.to_string(),
            DateStyle::YearOnly if s == PRESENT => s.to_string(),
            DateStyle::YearOnly => s.split('-').next().unwrap_or_default().to_string(),
        };
        match self {
            Dates::None => String::new(),
            Dates::Single { date } => fmt(date),
            Dates::Range { start, end } => format!("{}{separator}{}", fmt(start), fmt(end)),
        }
    }
}

/// A link in two forms. Both are empty when the entry has no link.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkRef {
    pub href: String,
    pub label: String,
}

impl LinkRef {
    pub fn is_empty(&self) -> bool {
        self.href.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub dates: Dates,
    pub link: LinkRef,
    pub body: String,
    /// Skill proficiency; `None` for every other kind.
    pub level: Option<u8>,
    pub break_rule: BreakRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub heading_rule: BreakRule,
    pub entries: Vec<EntryBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub header: HeaderBlock,
    pub summary: SummaryBlock,
    pub sections: Vec<SectionBlock>,
    pub accent_color: String,
    pub font: FontChoice,
}

// ────────────────────────────────────────────────────────────────────────────
// Policy
// ────────────────────────────────────────────────────────────────────────────

/// Whether a section renders at all (heading included).
pub fn section_visible(doc: &Document, kind: SectionKind) -> bool {
    kind.is_mandatory() || doc.section_len(kind) > 0
}

pub fn plan_layout(doc: &Document) -> LayoutPlan {
    let sections = doc
        .meta
        .section_order
        .iter()
        .copied()
        .filter(|kind| section_visible(doc, *kind))
        .map(|kind| SectionBlock {
            kind,
            heading: kind.heading(),
            heading_rule: BreakRule::KeepWithNext,
            entries: section_entries(doc, kind),
        })
        .collect();

    LayoutPlan {
        header: header_block(doc),
        summary: SummaryBlock {
            text: doc.personal.summary.clone(),
            break_rule: BreakRule::Atomic,
        },
        sections,
        accent_color: doc.meta.accent_color.clone(),
        font: doc.meta.font_family,
    }
}

fn header_block(doc: &Document) -> HeaderBlock {
    let p = &doc.personal;
    let contacts = [
        (ContactKind::Email, &p.email),
        (ContactKind::Phone, &p.phone),
        (ContactKind::Location, &p.location),
        (ContactKind::Website, &p.website),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(kind, value)| Contact {
        kind,
        value: value.clone(),
    })
    .collect();

    HeaderBlock {
        full_name: p.full_name.clone(),
        job_title: p.job_title.clone(),
        contacts,
    }
}

fn section_entries(doc: &Document, kind: SectionKind) -> Vec<EntryBlock> {
    match kind {
        SectionKind::Work => doc
            .work
            .iter()
            .map(|w| EntryBlock {
                title: w.position.clone(),
                subtitle: w.company.clone(),
                dates: date_range(&w.start_date, &w.end_date, w.current),
                body: w.description.clone(),
                ..entry(&w.id)
            })
            .collect(),
        SectionKind::Education => doc
            .education
            .iter()
            .map(|e| EntryBlock {
                title: e.school.clone(),
                subtitle: join_non_empty(&[&e.degree, &e.field], ", "),
                dates: date_range(&e.start_date, &e.end_date, e.current),
                ..entry(&e.id)
            })
            .collect(),
        SectionKind::Skills => doc
            .skills
            .iter()
            .map(|s| EntryBlock {
                title: s.name.clone(),
                level: Some(s.level.min(100)),
                ..entry(&s.id)
            })
            .collect(),
        SectionKind::Projects => doc
            .projects
            .iter()
            .map(|p| EntryBlock {
                title: p.name.clone(),
                link: link_ref(&p.link),
                body: p.description.clone(),
                ..entry(&p.id)
            })
            .collect(),
        SectionKind::Certifications => doc
            .certifications
            .iter()
            .map(|c| EntryBlock {
                title: c.name.clone(),
                subtitle: c.issuer.clone(),
                dates: Dates::Single {
                    date: c.date.clone(),
                },
                link: link_ref(&c.link),
                ..entry(&c.id)
            })
            .collect(),
    }
}

fn entry(id: &str) -> EntryBlock {
    EntryBlock {
        id: id.to_string(),
        title: String::new(),
        subtitle: String::new(),
        dates: Dates::None,
        link: LinkRef::default(),
        body: String::new(),
        level: None,
        break_rule: BreakRule::Atomic,
    }
}

/// The `current` flag wins over any stored end date.
pub fn date_range(start: &str, end: &str, current: bool) -> Dates {
    Dates::Range {
        start: start.to_string(),
        end: if current {
            PRESENT.to_string()
        } else {
            end.to_string()
        },
    }
}

pub fn link_ref(raw: &str) -> LinkRef {
    let raw = raw.trim();
    if raw.is_empty() {
        return LinkRef::default();
    }
    let href = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    let label = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw)
        .to_string();
    LinkRef { href, label }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
