//! Printable HTML for a template layout.
//!
//! The markup carries the print rules the rasterizer and the browser print
//! fallback both honour: A4 portrait, entries kept whole, headings kept with
//! the next block.

use askama::Template;

use crate::layout::policy::{ContactKind, DateStyle, EntryBlock, SectionBlock};
use crate::layout::templates::{Column, ColumnRole, TemplateLayout};
use crate::models::document::{FontChoice, SectionKind, TemplateKind};

struct ContactView {
    kind: &'static str,
    value: String,
}

struct EntryView {
    title: String,
    subtitle: String,
    dates: String,
    link_href: String,
    link_label: String,
    body: String,
    has_level: bool,
    level: u8,
    highlighted: bool,
}

struct SectionView {
    kind: &'static str,
    heading: &'static str,
    entries: Vec<EntryView>,
}

struct ColumnView {
    role: &'static str,
    width_pct: String,
    includes_summary: bool,
    sections: Vec<SectionView>,
}

#[derive(Template)]
#[template(path = "resume.html")]
struct ResumePage {
    title: String,
    template: &'static str,
    font_class: &'static str,
    font_stack: &'static str,
    accent: String,
    full_name: String,
    job_title: String,
    contacts: Vec<ContactView>,
    summary_heading: &'static str,
    summary: String,
    columns: Vec<ColumnView>,
}

/// Skill levels above this get the creative template's highlight mark.
const HIGHLIGHT_LEVEL: u8 = 80;

pub fn render_html(layout: &TemplateLayout, accent: &str, font: FontChoice) -> Result<String, askama::Error> {
    let full_name = layout.header.full_name.clone();
    let page = ResumePage {
        title: if full_name.trim().is_empty() {
            "Resume".to_string()
        } else {
            format!("{} - Resume", full_name.trim())
        },
        template: layout.template.as_str(),
        font_class: font.css_class(),
        font_stack: font_stack(font),
        accent: accent.to_string(),
        full_name,
        job_title: layout.header.job_title.clone(),
        contacts: layout
            .header
            .contacts
            .iter()
            .map(|c| ContactView {
                kind: contact_kind(c.kind),
                value: c.value.clone(),
            })
            .collect(),
        summary_heading: layout.summary_heading,
        summary: layout.summary.text.clone(),
        columns: layout
            .columns
            .iter()
            .map(|c| column_view(c, layout))
            .collect(),
    };
    page.render()
}

fn column_view(column: &Column, layout: &TemplateLayout) -> ColumnView {
    let highlight = layout.template == TemplateKind::Creative;
    ColumnView {
        role: match column.role {
            ColumnRole::Main => "main",
            ColumnRole::Sidebar => "sidebar",
        },
        width_pct: format!("{:.0}%", column.width_fraction * 100.0),
        includes_summary: column.includes_summary,
        sections: column
            .sections
            .iter()
            .map(|s| section_view(s, column.date_style, layout.date_separator, highlight))
            .collect(),
    }
}

fn section_view(section: &SectionBlock, style: DateStyle, separator: &str, highlight: bool) -> SectionView {
    SectionView {
        kind: section.kind.as_str(),
        heading: section.heading,
        entries: section
            .entries
            .iter()
            .map(|e| entry_view(section.kind, e, style, separator, highlight))
            .collect(),
    }
}

fn entry_view(kind: SectionKind, entry: &EntryBlock, style: DateStyle, separator: &str, highlight: bool) -> EntryView {
    let level = entry.level.unwrap_or(0);
    EntryView {
        title: entry.title.clone(),
        subtitle: entry.subtitle.clone(),
        dates: entry.dates.render(style, separator),
        link_href: entry.link.href.clone(),
        link_label: entry.link.label.clone(),
        body: entry.body.clone(),
        has_level: kind == SectionKind::Skills,
        level,
        highlighted: highlight && level > HIGHLIGHT_LEVEL,
    }
}

fn contact_kind(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "email",
        ContactKind::Phone => "phone",
        ContactKind::Location => "location",
        ContactKind::Website => "website",
    }
}

fn font_stack(font: FontChoice) -> &'static str {
    match font {
        FontChoice::Sans => "Inter, 'Helvetica Neue', Arial, sans-serif",
        FontChoice::Serif => "Georgia, 'Times New Roman', serif",
        FontChoice::Display => "'Montserrat', 'Arial Black', sans-serif",
        FontChoice::Mono => "'JetBrains Mono', Menlo, Consolas, monospace",
    }
}
