//! Line extraction: flatten raw blocks into typed [`Line`] records with
//! derived style and column attributes.
//!
//! ```text
//! RawBlock[] -> RawLine[] -> Line[]
//!                 line_text     dominant_style + column stamp
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::cleanup::normalize_text;
use crate::provider::{PageLayout, RawLine, RawSpan};
use crate::types::{Line, Style};

/// Font names matching this are treated as bold faces.
fn bold_font_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)bold|black|heavy").unwrap())
}

/// Returns `true` when the font name denotes a bold face.
pub fn is_bold_font(font: &str) -> bool {
    bold_font_re().is_match(font)
}

/// Concatenated, whitespace-trimmed text of a raw line.
pub fn line_text(line: &RawLine) -> String {
    let joined: String = line
        .spans
        .iter()
        .map(|s| normalize_text(&s.text))
        .collect();
    joined.trim().to_string()
}

/// The `(size, bold)` pair covering the most characters within a line.
///
/// Each span's style is weighted by its trimmed character count; ties are
/// broken by the order first encountered. Lines with no spans fall back to
/// [`Style::DEFAULT`].
pub fn dominant_style(spans: &[RawSpan]) -> Style {
    if spans.is_empty() {
        return Style::DEFAULT;
    }

    // Tally-and-argmax over a small key space; a Vec keeps insertion order
    // so the strict-greater scan below is a stable tie-break.
    let mut weights: Vec<(Style, usize)> = Vec::new();
    for span in spans {
        let style = Style::new(span.size.round() as i32, is_bold_font(&span.font));
        let weight = span.text.trim().chars().count();
        match weights.iter_mut().find(|(s, _)| *s == style) {
            Some((_, w)) => *w += weight,
            None => weights.push((style, weight)),
        }
    }

    let mut best = weights[0];
    for &entry in &weights[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best.0
}

/// Flatten one page's blocks into [`Line`]s.
///
/// Whitespace-only lines are discarded immediately. Each surviving line is
/// stamped with its column index from the page's column decision: 1 when the
/// page is two-column and the line's horizontal midpoint is right of the
/// page midpoint, else 0.
pub fn extract_lines(page_index: usize, page: &PageLayout, column_count: u8) -> Vec<Line> {
    let page_midpoint = page.width / 2.0;
    let mut lines: Vec<Line> = Vec::new();

    for block in &page.blocks {
        for raw in &block.lines {
            let text = line_text(raw);
            if text.is_empty() {
                continue;
            }

            let column = if column_count == 2 && raw.bbox.center_x() > page_midpoint {
                1
            } else {
                0
            };

            lines.push(Line {
                page: page_index,
                text,
                style: dominant_style(&raw.spans),
                bbox: raw.bbox,
                column,
            });
        }
    }

    lines
}
