//! Noise exclusion: repeating headers/footers, table containment, and
//! known non-content patterns (page markers, date lines).

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::extract::line_text;
use crate::provider::PageLayout;
use crate::types::{BBox, TableArea};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lines whose top edge is above this fraction of the page height are in the
/// header band.
const TOP_BAND: f32 = 0.20;

/// Lines whose bottom edge is below this fraction of the page height are in
/// the footer band.
const BOTTOM_BAND: f32 = 0.85;

/// A banded text must occur in at least this fraction of the scanned pages
/// to be suppressed.
const REPEAT_THRESHOLD: f32 = 0.4;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn page_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^Page \d+\s*of\s*\d+$").unwrap())
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4}\b").unwrap())
}

// ---------------------------------------------------------------------------
// Repeating header/footer detection
// ---------------------------------------------------------------------------

/// Detect text that repeats across pages in the header/footer bands.
///
/// Only the middle half of the document is scanned (title and reference
/// pages skew the counts), but the resulting ignore set applies
/// document-wide. Documents shorter than four pages yield an empty set.
pub fn detect_repeating_lines(pages: &[PageLayout]) -> HashSet<String> {
    let page_count = pages.len();
    if page_count < 4 {
        return HashSet::new();
    }

    let start = page_count / 4;
    let end = page_count - start;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for page in &pages[start..end] {
        for block in &page.blocks {
            for raw in &block.lines {
                let in_band = raw.bbox.y0 < page.height * TOP_BAND
                    || raw.bbox.y1 > page.height * BOTTOM_BAND;
                if !in_band {
                    continue;
                }
                let text = line_text(raw).replace('\n', " ");
                let len = text.chars().count();
                if len > 5 && len < 100 && !text.ends_with('.') {
                    *counts.entry(text).or_insert(0) += 1;
                }
            }
        }
    }

    let min_occurrences = (end - start) as f32 * REPEAT_THRESHOLD;
    counts
        .into_iter()
        .filter(|(_, count)| *count as f32 >= min_occurrences)
        .map(|(text, _)| text)
        .collect()
}

// ---------------------------------------------------------------------------
// Per-line exclusion predicates
// ---------------------------------------------------------------------------

/// A line is "in a table" iff its bbox is fully contained within one of the
/// page's table areas.
pub fn in_table(bbox: &BBox, tables: &[TableArea]) -> bool {
    tables.iter().any(|t| t.contains(bbox))
}

/// Matches "Page N of M" markers, case-insensitively.
pub fn is_page_marker(text: &str) -> bool {
    page_marker_re().is_match(text)
}

/// Heuristic for date lines: a 4-digit number, a 3-letter month
/// abbreviation, and at most 4 whitespace-separated tokens.
pub fn is_date_line(text: &str) -> bool {
    let lower = text.to_lowercase();
    if !year_re().is_match(&lower) {
        return false;
    }
    if !MONTHS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    text.split_whitespace().count() <= 4
}
