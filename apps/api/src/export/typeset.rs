//! LaTeX typesetting of a rendered document.
//!
//! The service never compiles LaTeX itself: the generated source is handed
//! to the external compile collaborator, which returns the PDF artifact.
//! Every piece of user text passes through `escape` on the way in.

use crate::layout::document::{Block, Column, Page, RenderedDocument};
use crate::layout::font_metrics::FontFamily;

/// Generates a complete standalone LaTeX document.
pub fn typeset(document: &RenderedDocument) -> String {
    let config = &document.config;
    let mut source = String::new();

    source.push_str(&format!(
        "\\documentclass[{}pt]{{article}}\n",
        config.font_size_pt
    ));
    source.push_str("\\usepackage[margin=1in]{geometry}\n");
    let font = font_package(config.font);
    if !font.is_empty() {
        source.push_str(font);
        source.push('\n');
    }
    source.push_str("\\usepackage{enumitem}\n");
    source.push_str("\\setlist[itemize]{noitemsep,topsep=2pt}\n");
    source.push_str("\\pagestyle{empty}\n");
    source.push_str("\\begin{document}\n");

    for (index, page) in document.pages.iter().enumerate() {
        if index > 0 {
            source.push_str("\\newpage\n");
        }
        typeset_page(&mut source, page);
    }

    source.push_str("\\end{document}\n");
    source
}

fn font_package(font: FontFamily) -> &'static str {
    match font {
        FontFamily::Inter => "\\usepackage{inter}\n\\renewcommand*\\familydefault{\\sfdefault}",
        FontFamily::EbGaramond => "\\usepackage{ebgaramond}",
        FontFamily::Lato => "\\usepackage{lato}\n\\renewcommand*\\familydefault{\\sfdefault}",
        // The TeX default needs no package.
        FontFamily::ComputerModern => "",
    }
}

fn typeset_page(out: &mut String, page: &Page) {
    let sidebar = page.regions.iter().find(|r| r.column == Column::Sidebar);
    let main = page.regions.iter().find(|r| r.column == Column::Main);

    if sidebar.is_some() || main.is_some() {
        out.push_str("\\noindent\\begin{minipage}[t]{0.32\\textwidth}\n");
        if let Some(sidebar) = sidebar {
            typeset_blocks(out, &sidebar.blocks);
        }
        out.push_str("\\end{minipage}\\hfill\\begin{minipage}[t]{0.64\\textwidth}\n");
        if let Some(main) = main {
            typeset_blocks(out, &main.blocks);
        }
        out.push_str("\\end{minipage}\n");
    }

    for region in page.regions.iter().filter(|r| r.column == Column::Full) {
        typeset_blocks(out, &region.blocks);
    }
}

fn typeset_blocks(out: &mut String, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading { level: 1, text } => {
                out.push_str(&format!(
                    "{{\\LARGE\\bfseries {}}}\\par\\medskip\n",
                    escape(text)
                ));
            }
            Block::Heading { text, .. } => {
                out.push_str(&format!("\\section*{{{}}}\n", escape(text)));
            }
            Block::Paragraph { text, justified } => {
                if *justified {
                    out.push_str(&format!("{}\\par\\smallskip\n", escape(text)));
                } else {
                    out.push_str(&format!("{{\\raggedright {}\\par}}\\smallskip\n", escape(text)));
                }
            }
            Block::Bullets { items } => {
                out.push_str("\\begin{itemize}\n");
                for item in items {
                    out.push_str(&format!("\\item {}\n", escape(item)));
                }
                out.push_str("\\end{itemize}\n");
            }
            Block::Entry { lead, detail, meta } => {
                out.push_str(&format!("\\noindent\\textbf{{{}}}", escape(lead)));
                if let Some(meta) = meta {
                    out.push_str(&format!("\\hfill{{\\itshape {}}}", escape(meta)));
                }
                out.push_str("\\par\n");
                if let Some(detail) = detail {
                    out.push_str(&format!("{}\\par\n", escape(detail)));
                }
                out.push_str("\\smallskip\n");
            }
            Block::Rule => {
                out.push_str("\\noindent\\rule{\\linewidth}{0.4pt}\\par\\smallskip\n");
            }
        }
    }
}

/// Escapes LaTeX special characters in user-entered text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            '#' | '$' | '%' | '&' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
