//! Static font-metric tables for the four template font families.
//!
//! Character widths are in em units (relative to font size). This is an
//! intentional approximation: the downstream typesetter decides the exact
//! line breaks, but static tables are enough to flow blocks onto pages with
//! an error of a line or two per page at worst.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The four supported font families, one per template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Modern template — clean humanist sans-serif.
    Inter,
    /// Professional template — classic old-style serif.
    EbGaramond,
    /// Minimal template — geometric humanist sans-serif.
    Lato,
    /// Classic template — traditional TeX font.
    ComputerModern,
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for a single page.
///
/// `text_width_em` is the usable text width in em units at the given font
/// size. Example: US letter paper, 1" margins, 11pt → 6.5" × (72.27pt/in ÷
/// 11pt) ≈ 42.7em.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: u8,
    /// Usable text width in em units (derived from paper size, margins, and
    /// font size).
    pub text_width_em: f32,
    /// Total line slots available per page (includes section headers and
    /// spacing).
    pub usable_height_lines: u16,
}

/// Returns the default page config for the given font family.
///
/// Assumes: US letter (8.5" × 11"), 11pt font, 1.0" margins all sides.
pub fn default_page_config(font: FontFamily) -> PageConfig {
    PageConfig {
        font,
        font_size_pt: 11,
        text_width_em: 42.7,
        usable_height_lines: 45,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Estimates how many printed lines this string occupies when
    /// word-wrapped at `width_em`, using greedy word wrap.
    pub fn estimated_lines(&self, s: &str, width_em: f32) -> u16 {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.is_empty() {
            return 0;
        }
        let mut line_count = 1u16;
        let mut current_width = 0.0_f32;
        let mut first = true;

        for word in &words {
            let word_w = self.measure_str(word);
            let space_w = if first { 0.0 } else { self.space_width };

            if !first && current_width + space_w + word_w > width_em {
                line_count = line_count.saturating_add(1);
                current_width = word_w;
                // first stays false — the next word on the new line gets a space
            } else {
                current_width += space_w + word_w;
                first = false;
            }
        }
        line_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Inter — humanist sans-serif (Modern template).
static INTER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Inter,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// EB Garamond — old-style serif (Professional template). Approx. 85% of Inter.
static EB_GARAMOND_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::EbGaramond,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.21, 0.26, 0.32, 0.48, 0.48, 0.76, 0.57, 0.19, 0.28, 0.28, 0.33, 0.50, 0.24, 0.28, 0.24, 0.26,
        // 0     1     2     3     4     5     6     7     8     9
        0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.50, 0.50, 0.50, 0.43, 0.87,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.57, 0.52, 0.52, 0.57, 0.48, 0.43, 0.57, 0.57, 0.21, 0.33, 0.52, 0.45, 0.66,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.57, 0.61, 0.48, 0.61, 0.52, 0.43, 0.48, 0.57, 0.57, 0.76, 0.52, 0.52, 0.48,
        // [     \     ]     ^     _     `
        0.24, 0.26, 0.24, 0.40, 0.48, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.48, 0.48, 0.43, 0.48, 0.48, 0.26, 0.48, 0.48, 0.19, 0.19, 0.45, 0.19, 0.71,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.48, 0.48, 0.48, 0.48, 0.28, 0.37, 0.33, 0.48, 0.43, 0.61, 0.43, 0.43, 0.37,
        // {     |     }     ~
        0.28, 0.22, 0.28, 0.50,
    ],
    average_char_width: 0.44,
    space_width: 0.21,
};

/// Lato — geometric humanist sans-serif (Minimal template). Approx. 105% of Inter.
static LATO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Lato,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.26, 0.32, 0.40, 0.59, 0.59, 0.94, 0.70, 0.23, 0.35, 0.35, 0.41, 0.62, 0.29, 0.35, 0.29, 0.33,
        // 0     1     2     3     4     5     6     7     8     9
        0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59,
        // :     ;     <     =     >     ?     @
        0.29, 0.29, 0.62, 0.62, 0.62, 0.53, 1.07,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.70, 0.64, 0.64, 0.70, 0.59, 0.53, 0.70, 0.70, 0.26, 0.41, 0.64, 0.56, 0.82,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.70, 0.76, 0.59, 0.76, 0.64, 0.53, 0.59, 0.70, 0.70, 0.94, 0.64, 0.64, 0.59,
        // [     \     ]     ^     _     `
        0.29, 0.33, 0.29, 0.49, 0.59, 0.36,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.59, 0.59, 0.53, 0.59, 0.59, 0.33, 0.59, 0.59, 0.23, 0.23, 0.56, 0.23, 0.87,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.59, 0.59, 0.59, 0.59, 0.35, 0.46, 0.41, 0.59, 0.53, 0.76, 0.53, 0.53, 0.46,
        // {     |     }     ~
        0.35, 0.27, 0.35, 0.62,
    ],
    average_char_width: 0.55,
    space_width: 0.26,
};

/// Computer Modern — traditional TeX font (Classic template). Approx. 90% of Inter.
static COMPUTER_MODERN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::ComputerModern,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.34, 0.50, 0.50, 0.80, 0.60, 0.20, 0.30, 0.30, 0.35, 0.53, 0.25, 0.30, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.60, 0.55, 0.55, 0.60, 0.50, 0.45, 0.60, 0.60, 0.23, 0.35, 0.55, 0.48, 0.70,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.60, 0.65, 0.50, 0.65, 0.55, 0.45, 0.50, 0.60, 0.60, 0.80, 0.55, 0.55, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.31,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.48, 0.20, 0.75,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.30, 0.40, 0.35, 0.50, 0.45, 0.65, 0.45, 0.45, 0.40,
        // {     |     }     ~
        0.30, 0.23, 0.30, 0.53,
    ],
    average_char_width: 0.47,
    space_width: 0.23,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::EbGaramond => &EB_GARAMOND_TABLE,
        FontFamily::Lato => &LATO_TABLE,
        FontFamily::ComputerModern => &COMPUTER_MODERN_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
