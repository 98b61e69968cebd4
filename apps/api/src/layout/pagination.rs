//! Page-break simulation for a template layout.
//!
//! Each column flows independently down A4 pages. The header takes the top of page 1
//! across all columns. Entries are never split unless one alone is taller than a page.
//! A section heading always lands on the same page as the first entry under it.
//! The report says how many pages the export will have and what lands on each.

use serde::Serialize;

use crate::layout::font_metrics::{FontMetrics, PageConfig};
use crate::layout::policy::{BreakRule, EntryBlock, SectionBlock};
use crate::layout::templates::TemplateLayout;
use crate::models::document::SectionKind;

/// Lines taken by name, job title, contact row and the gap below them.
const HEADER_LINES: u16 = 4;
/// Heading text plus the rule and spacing under it.
const HEADING_LINES: u16 = 2;
/// Gap after each non-skill entry.
const ENTRY_GAP_LINES: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockLabel {
    Summary,
    Heading { section: SectionKind },
    Entry { section: SectionKind, id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub column: usize,
    #[serde(flatten)]
    pub label: BlockLabel,
    pub lines: u16,
    /// True when the block is taller than the room left on a fresh page and runs on.
    pub overflows: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice {
    pub number: u16,
    pub blocks: Vec<PlacedBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationReport {
    pub page_count: u16,
    pub lines_per_page: u16,
    pub pages: Vec<PageSlice>,
}

struct FlowItem {
    label: BlockLabel,
    lines: u16,
    rule: BreakRule,
}

pub fn paginate(layout: &TemplateLayout, page: &PageConfig, metrics: &FontMetrics) -> PaginationReport {
    let capacity = page.usable_height_lines().max(HEADER_LINES + 1);
    let mut placed: Vec<(u16, PlacedBlock)> = Vec::new();
    let mut last_page = 0u16;

    for (index, column) in layout.columns.iter().enumerate() {
        let width_em = page.text_width_em() * column.width_fraction;
        let mut items = Vec::new();
        if column.includes_summary {
            items.push(FlowItem {
                label: BlockLabel::Summary,
                lines: HEADING_LINES.saturating_add(metrics.estimated_text_lines(&layout.summary.text, width_em)),
                rule: layout.summary.break_rule,
            });
        }
        for section in &column.sections {
            push_section(&mut items, section, metrics, width_em);
        }

        let end = place_column(index, &items, capacity, &mut placed);
        last_page = last_page.max(end);
    }

    let page_count = last_page.saturating_add(1);
    let mut pages: Vec<PageSlice> = (0..page_count)
        .map(|n| PageSlice {
            number: n + 1,
            blocks: Vec::new(),
        })
        .collect();
    for (page_index, block) in placed {
        pages[page_index as usize].blocks.push(block);
    }

    PaginationReport {
        page_count,
        lines_per_page: capacity,
        pages,
    }
}

fn push_section(items: &mut Vec<FlowItem>, section: &SectionBlock, metrics: &FontMetrics, width_em: f32) {
    items.push(FlowItem {
        label: BlockLabel::Heading {
            section: section.kind,
        },
        lines: HEADING_LINES,
        rule: section.heading_rule,
    });
    for entry in &section.entries {
        items.push(FlowItem {
            label: BlockLabel::Entry {
                section: section.kind,
                id: entry.id.clone(),
            },
            lines: entry_lines(section.kind, entry, metrics, width_em),
            rule: entry.break_rule,
        });
    }
}

fn entry_lines(kind: SectionKind, entry: &EntryBlock, metrics: &FontMetrics, width_em: f32) -> u16 {
    if kind == SectionKind::Skills {
        return 1;
    }
    // Line counts saturate; an absurdly long entry reads as "taller than any page".
    let mut lines = metrics.estimated_lines(&entry.title, width_em).max(1);
    if !entry.subtitle.trim().is_empty() {
        lines = lines.saturating_add(metrics.estimated_lines(&entry.subtitle, width_em));
    }
    if !entry.link.is_empty() {
        lines = lines.saturating_add(1);
    }
    lines
        .saturating_add(metrics.estimated_text_lines(&entry.body, width_em))
        .saturating_add(ENTRY_GAP_LINES)
}

/// Places one column's items; returns the index of the last page it touches.
fn place_column(column: usize, items: &[FlowItem], capacity: u16, out: &mut Vec<(u16, PlacedBlock)>) -> u16 {
    let mut page = 0u16;
    let mut used = HEADER_LINES;
    let mut i = 0;

    while i < items.len() {
        // A keep-with-next block travels with the block after it.
        let mut group_end = i + 1;
        while group_end < items.len() && items[group_end - 1].rule == BreakRule::KeepWithNext {
            group_end += 1;
        }
        let group = &items[i..group_end];
        let need = group
            .iter()
            .fold(0u16, |acc, item| acc.saturating_add(item.lines));
        let page_top = if page == 0 { HEADER_LINES } else { 0 };

        if need > capacity - used && used > page_top {
            page = page.saturating_add(1);
            used = 0;
        }

        let start_page = page;
        let mut overflows = false;
        let mut remaining = need;
        while remaining > capacity - used {
            overflows = true;
            remaining -= capacity - used;
            page = page.saturating_add(1);
            used = 0;
        }
        used += remaining;

        for item in group {
            out.push((
                start_page,
                PlacedBlock {
                    column,
                    label: item.label.clone(),
                    lines: item.lines,
                    overflows,
                },
            ));
        }
        i = group_end;
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{a4_page_config, metrics_for};
    use crate::layout::policy::plan_layout;
    use crate::layout::templates::arrange;
    use crate::models::defaults::sample_document;
    use crate::models::document::{Document, FontChoice, TemplateKind, WorkEntry};

    fn report(doc: &Document, template: TemplateKind) -> PaginationReport {
        let layout = arrange(&plan_layout(doc), template);
        paginate(&layout, &a4_page_config(), &metrics_for(doc.meta.font_family))
    }

    fn long_work(count: usize, bullets: usize) -> Vec<WorkEntry> {
        (0..count)
            .map(|n| WorkEntry {
                id: format!("w{n}"),
                company: format!("Company {n}"),
                position: "Engineer".to_string(),
                start_date: "2020-01".to_string(),
                description: vec!["• Delivered a measurable improvement to a core system"; bullets].join("\n"),
                ..Default::default()
            })
            .collect()
    }

    /// Page and block index of every placed block, in emission order.
    fn positions(report: &PaginationReport) -> Vec<(u16, &PlacedBlock)> {
        report
            .pages
            .iter()
            .flat_map(|p| p.blocks.iter().map(move |b| (p.number, b)))
            .collect()
    }

    #[test]
    fn test_sample_fits_one_page() {
        for template in TemplateKind::ALL {
            let report = report(&sample_document(), template);
            assert_eq!(report.page_count, 1, "{template:?}");
            assert_eq!(report.pages.len(), 1);
        }
    }

    #[test]
    fn test_long_history_spills_to_second_page() {
        let mut doc = sample_document();
        doc.work = long_work(12, 5);
        let report = report(&doc, TemplateKind::Classic);
        assert!(report.page_count >= 2);
    }

    #[test]
    fn test_heading_never_ends_a_page() {
        let mut doc = sample_document();
        doc.work = long_work(10, 6);
        let report = report(&doc, TemplateKind::Classic);
        let all = positions(&report);
        for (idx, (page, block)) in all.iter().enumerate() {
            if let BlockLabel::Heading { .. } = block.label {
                if let Some((next_page, next)) = all.get(idx + 1) {
                    if next.column == block.column {
                        assert_eq!(page, next_page, "heading separated from {:?}", next.label);
                    }
                }
            }
        }
    }

    #[test]
    fn test_entries_are_not_split_when_they_fit() {
        let mut doc = sample_document();
        doc.work = long_work(10, 6);
        let report = report(&doc, TemplateKind::Classic);
        assert!(report
            .pages
            .iter()
            .flat_map(|p| &p.blocks)
            .all(|b| !b.overflows));
    }

    #[test]
    fn test_oversized_entry_is_marked_overflowing() {
        let mut doc = sample_document();
        doc.work = long_work(1, 120);
        let report = report(&doc, TemplateKind::Classic);
        assert!(report.page_count >= 2);
        let entry = positions(&report)
            .into_iter()
            .find(|(_, b)| matches!(&b.label, BlockLabel::Entry { id, .. } if id == "w0"))
            .unwrap();
        assert!(entry.1.overflows);
    }

    #[test]
    fn test_columns_flow_independently() {
        let mut doc = sample_document();
        doc.work = long_work(12, 5);
        let report = report(&doc, TemplateKind::Modern);
        let sidebar_pages: Vec<u16> = positions(&report)
            .into_iter()
            .filter(|(_, b)| b.column == 0)
            .map(|(p, _)| p)
            .collect();
        assert!(sidebar_pages.iter().all(|p| *p == 1));
        assert!(report.page_count >= 2);
    }

    #[test]
    fn test_huge_entry_saturates_instead_of_overflowing() {
        let mut doc = sample_document();
        doc.work = vec![WorkEntry {
            id: "w0".to_string(),
            company: "Acme".to_string(),
            description: vec!["x"; 70_000].join("\n"),
            ..Default::default()
        }];
        let report = report(&doc, TemplateKind::Classic);
        let entry = positions(&report)
            .into_iter()
            .find(|(_, b)| matches!(&b.label, BlockLabel::Entry { id, .. } if id == "w0"))
            .unwrap();
        assert_eq!(entry.1.lines, u16::MAX);
        assert!(entry.1.overflows);
        assert!(report.page_count > 900);
        assert_eq!(report.pages.len(), report.page_count as usize);
    }

    #[test]
    fn test_narrow_font_never_needs_more_pages() {
        let mut doc = sample_document();
        doc.work = long_work(8, 5);
        doc.meta.font_family = FontChoice::Serif;
        let serif = report(&doc, TemplateKind::Classic).page_count;
        doc.meta.font_family = FontChoice::Display;
        let display = report(&doc, TemplateKind::Classic).page_count;
        assert!(serif <= display);
    }
}
