//! Built-in onboarding Document.
//!
//! The sample collections exist to show a new user what a filled-in resume looks like.
//! They are never used to back-fill a stored document's missing collections.

use crate::models::document::{
    Document, EducationEntry, FontChoice, Meta, PersonalInfo, ProjectEntry, SectionKind,
    SkillEntry, TemplateKind, WorkEntry,
};

pub const DEFAULT_ACCENT: &str = "#0ea5e9";

/// Maximum length accepted for the professional summary.
pub const SUMMARY_MAX_CHARS: usize = 500;

pub fn sample_document() -> Document {
    Document {
        personal: PersonalInfo {
            full_name: "Jordan Rivera".to_string(),
            job_title: "Senior Frontend Engineer".to_string(),
            email: "jordan.rivera@example.com".to_string(),
            phone: "(555) 010-2030".to_string(),
            location: "Portland, OR".to_string(),
            website: "github.com/jrivera".to_string(),
            summary: "Frontend engineer with seven years of experience shipping accessible, \
                      fast web applications. Comfortable owning features end to end, from \
                      design review through performance tuning in production."
                .to_string(),
        },
        work: vec![
            WorkEntry {
                id: "1".to_string(),
                company: "Northwind Software".to_string(),
                position: "Senior Frontend Engineer".to_string(),
                start_date: "2021-04".to_string(),
                end_date: String::new(),
                current: true,
                description: "• Moved a monolithic dashboard to independently deployed modules.\n\
                              • Cut initial bundle size by 35% with route-level code splitting.\n\
                              • Mentored four engineers through their first production launches."
                    .to_string(),
            },
            WorkEntry {
                id: "2".to_string(),
                company: "Brightline Studio".to_string(),
                position: "Frontend Developer".to_string(),
                start_date: "2018-07".to_string(),
                end_date: "2021-03".to_string(),
                current: false,
                description: "• Built responsive marketing sites for retail and travel clients.\n\
                              • Worked with designers on a shared component library."
                    .to_string(),
            },
        ],
        education: vec![EducationEntry {
            id: "1".to_string(),
            school: "State Polytechnic University".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2014-09".to_string(),
            end_date: "2018-06".to_string(),
            current: false,
        }],
        skills: vec![
            skill("1", "TypeScript", 95),
            skill("2", "Rust", 75),
            skill("3", "Accessibility", 85),
            skill("4", "GraphQL", 70),
            skill("5", "CSS Architecture", 90),
        ],
        projects: vec![
            ProjectEntry {
                id: "1".to_string(),
                name: "Metrics Board".to_string(),
                link: "github.com/jrivera/metrics-board".to_string(),
                description: "Self-hosted analytics dashboard with live charts and CSV export."
                    .to_string(),
            },
            ProjectEntry {
                id: "2".to_string(),
                name: "Pocket Planner".to_string(),
                link: "pocketplanner.app".to_string(),
                description: "Offline-first task manager for iOS and Android.".to_string(),
            },
        ],
        certifications: Vec::new(),
        meta: Meta {
            template: TemplateKind::Modern,
            accent_color: DEFAULT_ACCENT.to_string(),
            font_family: FontChoice::Sans,
            section_order: vec![
                SectionKind::Work,
                SectionKind::Projects,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Certifications,
            ],
        },
    }
}

fn skill(id: &str, name: &str, level: u8) -> SkillEntry {
    SkillEntry {
        id: id.to_string(),
        name: name.to_string(),
        level,
    }
}
