//! Approximate glyph metrics for the four resume font choices, plus the A4 page geometry.
//!
//! Widths are in em units. A single proportional table (humanist sans) is scaled per
//! font; the monospace choice uses a fixed advance. The estimate only has to be close
//! enough to decide where page breaks fall, not to reproduce the browser's wrapping.
//! Table index = (char as usize) - 32, covering ASCII 0x20..=0x7E.

use serde::Serialize;

use crate::models::document::FontChoice;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Geometry of one printed page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageConfig {
    pub paper: &'static str,
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

/// A4 portrait with 0.25in margins and 11px body text.
pub fn a4_page_config() -> PageConfig {
    PageConfig {
        paper: "a4",
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 6.35,
        font_size_pt: 8.25,
        line_height: 1.375,
    }
}

impl PageConfig {
    /// Usable text width in em units at the body font size.
    pub fn text_width_em(&self) -> f32 {
        (self.width_mm - 2.0 * self.margin_mm) * PT_PER_MM / self.font_size_pt
    }

    /// Number of body lines that fit between the top and bottom margins.
    pub fn usable_height_lines(&self) -> u16 {
        let usable_pt = (self.height_mm - 2.0 * self.margin_mm) * PT_PER_MM;
        (usable_pt / (self.font_size_pt * self.line_height)).floor() as u16
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metrics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub font: FontChoice,
    /// Multiplier applied to the base proportional table.
    scale: f32,
    /// Fixed advance for every glyph; overrides the table when set.
    fixed_advance: Option<f32>,
}

pub fn metrics_for(font: FontChoice) -> FontMetrics {
    let (scale, fixed_advance) = match font {
        FontChoice::Sans => (1.0, None),
        FontChoice::Serif => (0.88, None),
        // Heavy display faces run wide.
        FontChoice::Display => (1.06, None),
        FontChoice::Mono => (1.0, Some(0.60)),
    };
    FontMetrics {
        font,
        scale,
        fixed_advance,
    }
}

impl FontMetrics {
    fn char_width(&self, c: char) -> f32 {
        if let Some(advance) = self.fixed_advance {
            return advance;
        }
        let code = c as usize;
        let base = if (32..=126).contains(&code) {
            BASE_WIDTHS[code - 32]
        } else {
            AVERAGE_WIDTH
        };
        base * self.scale
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word-wrap line count of one paragraph at `width_em`. Empty text is 0 lines.
    pub fn estimated_lines(&self, s: &str, width_em: f32) -> u16 {
        let space = self.char_width(' ');
        let mut lines = 0u16;
        let mut current = 0.0_f32;

        for word in s.split_whitespace() {
            let w = self.measure_str(word);
            if lines == 0 {
                lines = 1;
                current = w;
            } else if current + space + w > width_em {
                lines = lines.saturating_add(1);
                current = w;
            } else {
                current += space + w;
            }
        }
        lines
    }

    /// Line count of multi-paragraph text rendered with preserved line breaks.
    /// Blank lines between paragraphs still take a line.
    pub fn estimated_text_lines(&self, s: &str, width_em: f32) -> u16 {
        if s.trim().is_empty() {
            return 0;
        }
        s.trim()
            .lines()
            .map(|line| self.estimated_lines(line, width_em).max(1))
            .fold(0u16, u16::saturating_add)
    }
}

const AVERAGE_WIDTH: f32 = 0.52;

#[rustfmt::skip]
static BASE_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0-9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A-M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N-Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a-m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n-z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
