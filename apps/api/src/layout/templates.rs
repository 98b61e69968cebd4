//! Template adapters: map one `LayoutPlan` onto a template's columns.
//!
//! Adapters decide where sections go and how they are labelled. They never change
//! which sections are visible or the relative order `plan_layout` produced.

use serde::Serialize;

use crate::layout::policy::{DateStyle, HeaderBlock, LayoutPlan, SectionBlock, SummaryBlock};
use crate::models::document::{SectionKind, TemplateKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Main,
    Sidebar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub role: ColumnRole,
    /// Share of the text width, 0.0..=1.0.
    pub width_fraction: f32,
    pub includes_summary: bool,
    pub date_style: DateStyle,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLayout {
    pub template: TemplateKind,
    pub summary_heading: &'static str,
    pub date_separator: &'static str,
    pub header: HeaderBlock,
    pub summary: SummaryBlock,
    pub columns: Vec<Column>,
}

/// Sections that go to the narrow or right-hand column of multi-column templates.
const SECONDARY: [SectionKind; 3] = [
    SectionKind::Education,
    SectionKind::Certifications,
    SectionKind::Skills,
];

pub fn arrange(plan: &LayoutPlan, template: TemplateKind) -> TemplateLayout {
    let (summary_heading, date_separator, columns) = match template {
        TemplateKind::Classic => (
            "Professional Summary",
            " — ",
            vec![column(ColumnRole::Main, 1.0, true, DateStyle::Full, plan.sections.clone())],
        ),
        TemplateKind::Modern => {
            let (sidebar, main) = split(&plan.sections, &SECONDARY);
            (
                "Profile",
                " - ",
                vec![
                    column(ColumnRole::Sidebar, 0.28, false, DateStyle::YearOnly, sidebar),
                    column(ColumnRole::Main, 0.72, true, DateStyle::Full, main),
                ],
            )
        }
        TemplateKind::Creative => {
            let (right, left) = split(&plan.sections, &SECONDARY);
            (
                "Summary",
                " — ",
                vec![
                    column(ColumnRole::Main, 0.5, true, DateStyle::Full, left),
                    column(ColumnRole::Sidebar, 0.5, false, DateStyle::Full, right),
                ],
            )
        }
    };

    TemplateLayout {
        template,
        summary_heading,
        date_separator,
        header: plan.header.clone(),
        summary: plan.summary.clone(),
        columns,
    }
}

fn column(
    role: ColumnRole,
    width_fraction: f32,
    includes_summary: bool,
    date_style: DateStyle,
    sections: Vec<SectionBlock>,
) -> Column {
    Column {
        role,
        width_fraction,
        includes_summary,
        date_style,
        sections,
    }
}

/// Splits sections into (in `kinds`, rest), keeping relative order on both sides.
fn split(sections: &[SectionBlock], kinds: &[SectionKind]) -> (Vec<SectionBlock>, Vec<SectionBlock>) {
    sections
        .iter()
        .cloned()
        .partition(|s| kinds.contains(&s.kind))
}
