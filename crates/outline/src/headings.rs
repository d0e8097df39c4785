//! Heading classification: body-style deduction, the page-0 participation
//! gate, candidate filtering, level assignment, and adjacent-fragment
//! merging.
//!
//! ```text
//! Line[]  ->  body style  ->  candidates  ->  leveled fragments  ->  OutlineEntry[]
//!             deduce          filter          rank styles            merge walk
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{HeadingLevel, Line, OutlineEntry, Style};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The hierarchy is capped at H1..H3.
const MAX_LEVELS: usize = 3;

/// Candidate text length bounds, both strict.
const MIN_TEXT_LEN: usize = 3;
const MAX_TEXT_LEN: usize = 250;

/// Candidates may have at most this many words.
const MAX_WORDS: usize = 25;

/// A candidate ending in `.`, `,`, or `;` is prose unless it has at most
/// this many words.
const MAX_TRAILING_PUNCT_WORDS: usize = 15;

/// Page 0 participates only if it has at least one body-style line with
/// this many words and more than this many characters.
const MIN_PARAGRAPH_WORDS: usize = 30;
const MIN_PARAGRAPH_CHARS: usize = 30;

/// Above this uppercase ratio a line counts as predominantly uppercase.
const MAX_UPPERCASE_RATIO: f32 = 0.8;

/// Two adjacent fragments merge when the vertical gap is under this
/// multiple of the heading size.
const MERGE_GAP_FACTOR: f32 = 0.5;

/// Text composed solely of digits, punctuation, and underscores.
fn non_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\W_]+$").unwrap())
}

// ---------------------------------------------------------------------------
// Body style deduction
// ---------------------------------------------------------------------------

/// Deduce the paragraph-text style from the retained corpus.
///
/// The most frequent non-bold style wins even when a bold style occurs more
/// often overall; only when every line is bold does the overall argmax
/// apply. An empty corpus falls back to [`Style::DEFAULT`]. Ties break
/// toward the style first encountered.
pub fn deduce_body_style(lines: &[Line]) -> Style {
    let mut counts: Vec<(Style, usize)> = Vec::new();
    for line in lines {
        match counts.iter_mut().find(|(s, _)| *s == line.style) {
            Some((_, c)) => *c += 1,
            None => counts.push((line.style, 1)),
        }
    }

    argmax(counts.iter().filter(|(s, _)| !s.bold))
        .or_else(|| argmax(counts.iter()))
        .unwrap_or(Style::DEFAULT)
}

/// Strict-greater argmax over `(style, count)` pairs; stable for ties.
fn argmax<'a>(entries: impl Iterator<Item = &'a (Style, usize)>) -> Option<Style> {
    let mut best: Option<(Style, usize)> = None;
    for &(style, count) in entries {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((style, count));
        }
    }
    best.map(|(s, _)| s)
}

// ---------------------------------------------------------------------------
// Page-0 participation gate
// ---------------------------------------------------------------------------

/// Uppercase ratio over alphabetic characters, or `false` when there are
/// none.
fn is_mostly_uppercase(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f32 / letters.len() as f32 > MAX_UPPERCASE_RATIO
}

/// Does page 0 carry real paragraph text?
///
/// Title-page-only documents should not contribute spurious headings, so
/// page 0 joins heading analysis only when at least one of its lines reads
/// like a paragraph: body style, 30+ words, over 30 characters, and not
/// predominantly uppercase.
pub fn page0_has_paragraphs(lines: &[Line], body: Style) -> bool {
    lines.iter().any(|l| {
        l.page == 0
            && l.style == body
            && l.word_count() >= MIN_PARAGRAPH_WORDS
            && l.char_count() > MIN_PARAGRAPH_CHARS
            && !is_mostly_uppercase(&l.text)
    })
}

// ---------------------------------------------------------------------------
// Candidate filtering
// ---------------------------------------------------------------------------

/// Content-shape filter for one line, given the deduced body style.
///
/// A candidate must be stylistically distinct from the body (larger size,
/// or bold against a non-bold body) and shaped like a heading rather than
/// prose or decoration.
fn is_candidate(line: &Line, body: Style) -> bool {
    let distinct = line.style.size > body.size || (line.style.bold && !body.bold);
    if !distinct {
        return false;
    }

    let len = line.char_count();
    if len <= MIN_TEXT_LEN || len >= MAX_TEXT_LEN {
        return false;
    }
    if line.word_count() > MAX_WORDS {
        return false;
    }
    if non_content_re().is_match(&line.text) {
        return false;
    }
    if line.text.ends_with(['.', ',', ';']) && line.word_count() > MAX_TRAILING_PUNCT_WORDS {
        return false;
    }

    true
}

// ---------------------------------------------------------------------------
// Level assignment
// ---------------------------------------------------------------------------

/// Rank the distinct candidate styles and keep the top [`MAX_LEVELS`].
///
/// Descending `(size, bold)` order: larger sizes first, bold before
/// non-bold at equal size. The returned position is the zero-based level
/// rank.
fn style_hierarchy(candidates: &[&Line]) -> Vec<Style> {
    let mut styles: Vec<Style> = Vec::new();
    for c in candidates {
        if !styles.contains(&c.style) {
            styles.push(c.style);
        }
    }
    styles.sort_by(|a, b| b.cmp(a));
    styles.truncate(MAX_LEVELS);
    styles
}

// ---------------------------------------------------------------------------
// Fragment merging
// ---------------------------------------------------------------------------

/// A heading candidate with its assigned level, ready for the merge walk.
#[derive(Debug, Clone)]
struct Fragment {
    level: HeadingLevel,
    text: String,
    page: usize,
    column: u8,
    style: Style,
    y0: f32,
    y1: f32,
}

/// Merge adjacent same-style fragments into outline entries.
///
/// Fragments are walked in `(page, column, y0)` order. A run extends while
/// the next fragment shares the run's page, column, and style, and its top
/// edge sits within [`MERGE_GAP_FACTOR`] times the heading size of the
/// immediately preceding fragment's bottom edge. Each run emits one entry
/// with space-joined text and the first fragment's level and page.
fn merge_fragments(mut fragments: Vec<Fragment>) -> Vec<OutlineEntry> {
    fragments.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.column.cmp(&b.column))
            .then(
                a.y0
                    .partial_cmp(&b.y0)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    let mut outline: Vec<OutlineEntry> = Vec::new();
    let mut i = 0;
    while i < fragments.len() {
        let head = &fragments[i];
        let merge_gap = head.style.size as f32 * MERGE_GAP_FACTOR;
        let mut text = head.text.clone();

        let mut j = i + 1;
        while j < fragments.len() {
            let next = &fragments[j];
            let prev_y1 = fragments[j - 1].y1;
            let joins = next.page == head.page
                && next.column == head.column
                && next.style == head.style
                && (next.y0 - prev_y1).abs() < merge_gap;
            if !joins {
                break;
            }
            text.push(' ');
            text.push_str(&next.text);
            j += 1;
        }

        outline.push(OutlineEntry {
            level: head.level,
            text: text.trim().to_string(),
            page: head.page,
        });
        i = j;
    }

    outline
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the full heading-classification stage over the retained, title-free
/// corpus and produce the final outline in reading order.
pub fn build_outline(lines: &[Line]) -> Vec<OutlineEntry> {
    let body = deduce_body_style(lines);
    log::info!("deduced body text style: {}", body);

    let page0_ok = page0_has_paragraphs(lines, body);
    if !page0_ok {
        log::info!("page 0 has no paragraph text; ignoring it for headings");
    }

    let candidates: Vec<&Line> = lines
        .iter()
        .filter(|l| (page0_ok || l.page != 0) && is_candidate(l, body))
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let hierarchy = style_hierarchy(&candidates);
    for (rank, style) in hierarchy.iter().enumerate() {
        log::info!("heading hierarchy: H{} -> {}", rank + 1, style);
    }

    let fragments: Vec<Fragment> = candidates
        .iter()
        .filter(|l| page0_ok || l.page != 0)
        .filter_map(|l| {
            let rank = hierarchy.iter().position(|s| *s == l.style)?;
            let level = HeadingLevel::from_rank(rank)?;
            Some(Fragment {
                level,
                text: l.text.clone(),
                page: l.page,
                column: l.column,
                style: l.style,
                y0: l.bbox.y0,
                y1: l.bbox.y1,
            })
        })
        .collect();

    merge_fragments(fragments)
}
