//! Template renderer — the pure mapping
//! `(ResumeRecord, Template) -> RenderedDocument`.
//!
//! The four templates are interchangeable layout strategies over the same
//! input contract; they differ only in arrangement, never in the semantics
//! of the underlying data. Common rules live here:
//! - date ranges print "Present" while `current` is set;
//! - missing optional fields are omitted inline, except name/branch which
//!   fall back to generic placeholder text;
//! - lists render in stored order, with empty sections omitted entirely;
//! - technologies always collapse to one comma-joined string.
//!
//! The renderer never fails: absence of a field is always a renderable state.

pub mod classic;
pub mod minimal;
pub mod modern;
pub mod professional;

use crate::layout::document::{paginate, Block, Column, ColumnFlow, RenderedDocument};
use crate::layout::font_metrics::{default_page_config, FontFamily, PageConfig};
use crate::models::resume::{PersonalInfo, ResumeRecord, Skill, Template};

pub(crate) const NAME_FALLBACK: &str = "Student Name";
pub(crate) const BRANCH_FALLBACK: &str = "Branch Name";

/// Sidebar share of the text width in two-column layouts.
const SIDEBAR_RATIO: f32 = 0.32;
/// Gap between sidebar and main column, in em.
const GUTTER_EM: f32 = 1.5;

// ────────────────────────────────────────────────────────────────────────────
// Dispatch
// ────────────────────────────────────────────────────────────────────────────

/// Page configuration per template. Each template owns a font family; the
/// minimal template additionally drops a point of size for a denser page.
pub fn page_config_for(template: Template) -> PageConfig {
    match template {
        Template::Classic => default_page_config(FontFamily::ComputerModern),
        Template::Modern => default_page_config(FontFamily::Inter),
        Template::Minimal => {
            let mut config = default_page_config(FontFamily::Lato);
            config.font_size_pt = 10;
            config.text_width_em = 47.0;
            config.usable_height_lines = 52;
            config
        }
        Template::Professional => default_page_config(FontFamily::EbGaramond),
    }
}

/// Renders a snapshot of the record with the selected template.
pub fn render(record: &ResumeRecord, template: Template) -> RenderedDocument {
    let config = page_config_for(template);
    let columns = match template {
        Template::Classic => classic::compose(record),
        Template::Modern => modern::compose(record),
        Template::Minimal => minimal::compose(record),
        Template::Professional => professional::compose(record),
    };

    let flows: Vec<ColumnFlow> = columns
        .into_iter()
        .map(|(column, blocks)| ColumnFlow {
            width_em: match column {
                Column::Full => config.text_width_em,
                Column::Sidebar => config.text_width_em * SIDEBAR_RATIO,
                Column::Main => config.text_width_em * (1.0 - SIDEBAR_RATIO) - GUTTER_EM,
            },
            column,
            blocks,
        })
        .collect();

    let pages = paginate(&flows, &config);
    RenderedDocument {
        template,
        config,
        pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared composition helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn section_heading(text: &str) -> Block {
    Block::Heading {
        level: 2,
        text: text.to_string(),
    }
}

/// Trimmed non-empty text, or nothing. Absent fields are omitted inline —
/// never rendered as a literal placeholder.
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn display_name(info: &PersonalInfo) -> String {
    info.name
        .as_deref()
        .and_then(non_empty)
        .unwrap_or_else(|| NAME_FALLBACK.to_string())
}

pub(crate) fn display_branch(info: &PersonalInfo) -> String {
    info.branch
        .as_deref()
        .and_then(non_empty)
        .unwrap_or_else(|| BRANCH_FALLBACK.to_string())
}

/// `start - end`, printing "Present" while the engagement is current. The
/// stored `end_date` is ignored whenever `current` is set.
pub(crate) fn date_range(start: &str, end: Option<&str>, current: bool) -> String {
    let start = start.trim();
    let end: Option<&str> = if current {
        Some("Present")
    } else {
        end.map(str::trim).filter(|e| !e.is_empty())
    };
    match (start.is_empty(), end) {
        (false, Some(end)) => format!("{start} - {end}"),
        (false, None) => start.to_string(),
        (true, Some(end)) => end.to_string(),
        (true, None) => String::new(),
    }
}

/// Years-only variant for the minimal template.
pub(crate) fn year_range(start: &str, end: Option<&str>, current: bool) -> String {
    let start = year_text_of(start);
    let end = end.map(year_text_of);
    date_range(&start, end.as_deref(), current)
}

pub(crate) fn year_text_of(date: &str) -> String {
    year_of(date)
        .map(str::to_string)
        .unwrap_or_else(|| date.trim().to_string())
}

/// First run of four consecutive ASCII digits, e.g. "2024" in "03/2024".
fn year_of(date: &str) -> Option<&str> {
    let bytes = date.as_bytes();
    let mut run = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == 4 {
                return Some(&date[i + 1 - 4..=i]);
            }
        } else {
            run = 0;
        }
    }
    None
}

/// One comma-joined string, the same in every template.
pub(crate) fn technologies_line(technologies: &[String]) -> Option<String> {
    let parts: Vec<&str> = technologies
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Present contact fields, in a fixed order.
pub(crate) fn contact_parts(info: &PersonalInfo) -> Vec<String> {
    [&info.email, &info.phone, &info.linkedin, &info.github, &info.location]
        .into_iter()
        .filter_map(|field| field.as_deref().and_then(non_empty))
        .collect()
}

pub(crate) fn skill_line(skill: &Skill) -> String {
    match skill.level.as_deref().and_then(non_empty) {
        Some(level) => format!("{} ({level})", skill.name.trim()),
        None => skill.name.trim().to_string(),
    }
}

pub(crate) fn join_nonempty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Education is derived from personal info; `branch` has a placeholder, so
/// the section is always renderable.
pub(crate) fn education_entry(info: &PersonalInfo) -> Block {
    Block::Entry {
        lead: display_branch(info),
        detail: info.cgpa.map(|cgpa| format!("CGPA: {cgpa:.2}")),
        meta: info.year.as_deref().and_then(non_empty),
    }
}

/// Splits a free-text description into bullet items, one per non-empty line,
/// stripping any leading list markers the user typed themselves.
pub(crate) fn description_bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
