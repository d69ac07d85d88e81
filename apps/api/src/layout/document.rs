//! Paginated document structure and the block-flow paginator.
//!
//! A `RenderedDocument` is the template-independent output contract: pages
//! of column regions of layout blocks. Templates only decide which blocks go
//! into which column; this module decides where the page breaks fall, using
//! the font-metric line estimates against the page line budget.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, PageConfig};
use crate::models::resume::Template;

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Section or document heading. Level 1 is the document title.
    Heading { level: u8, text: String },
    Paragraph { text: String, justified: bool },
    Bullets { items: Vec<String> },
    /// One entry line: a bold lead, an optional detail line below it, and an
    /// optional right-aligned meta string (dates, links).
    Entry {
        lead: String,
        detail: Option<String>,
        meta: Option<String>,
    },
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Full,
    Sidebar,
    Main,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub column: Column,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: u16,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub template: Template,
    pub config: PageConfig,
    pub pages: Vec<Page>,
}

/// One column's worth of blocks, flowed independently of the others.
#[derive(Debug, Clone)]
pub struct ColumnFlow {
    pub column: Column,
    pub width_em: f32,
    pub blocks: Vec<Block>,
}

// ────────────────────────────────────────────────────────────────────────────
// Line estimation
// ────────────────────────────────────────────────────────────────────────────

/// Estimated line slots a block occupies in a column of `width_em`,
/// including its trailing spacing.
pub fn block_lines(block: &Block, config: &PageConfig, width_em: f32) -> u16 {
    let metrics = get_metrics(&config.font);
    match block {
        Block::Heading { .. } => 2,
        Block::Paragraph { text, .. } => metrics.estimated_lines(text, width_em).max(1),
        Block::Bullets { items } => items
            .iter()
            .map(|item| metrics.estimated_lines(item, width_em).max(1))
            .sum::<u16>()
            .max(1),
        Block::Entry { detail, .. } => 1 + u16::from(detail.is_some()),
        Block::Rule => 1,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Flows each column's blocks into pages. Columns paginate independently;
/// the document gets as many pages as the longest column needs, and every
/// page carries one region per column that still has content.
pub fn paginate(flows: &[ColumnFlow], config: &PageConfig) -> Vec<Page> {
    let mut per_column: Vec<(Column, Vec<Vec<Block>>)> = flows
        .iter()
        .map(|flow| (flow.column, split_column(flow, config)))
        .collect();

    let page_count = per_column
        .iter()
        .map(|(_, pages)| pages.len())
        .max()
        .unwrap_or(0)
        .max(1);

    (0..page_count)
        .map(|index| Page {
            number: (index + 1) as u16,
            regions: per_column
                .iter_mut()
                .filter_map(|(column, pages)| {
                    let blocks = pages.get_mut(index)?;
                    Some(Region {
                        column: *column,
                        blocks: std::mem::take(blocks),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Splits one column's blocks into page-sized chunks.
///
/// A heading is never left dangling at the bottom of a page: placing one
/// requires room for at least one following content line.
fn split_column(flow: &ColumnFlow, config: &PageConfig) -> Vec<Vec<Block>> {
    let budget = config.usable_height_lines;
    let mut pages: Vec<Vec<Block>> = Vec::new();
    let mut current: Vec<Block> = Vec::new();
    let mut used: u16 = 0;

    for block in &flow.blocks {
        let lines = block_lines(block, config, flow.width_em);
        let needed = if matches!(block, Block::Heading { .. }) {
            lines + 1
        } else {
            lines
        };

        // A block taller than a whole page still gets placed alone rather
        // than dropped; the typesetter absorbs the overflow.
        if used + needed > budget && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        used = used.saturating_add(lines);
        current.push(block.clone());
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
