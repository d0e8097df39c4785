//! Title resolution: identify and consume the title lines on page 0.

use std::collections::HashSet;

use crate::provider::PageLayout;
use crate::types::{Line, LineId};

/// A title is at most this many accumulated lines.
const MAX_TITLE_LINES: usize = 2;

/// A continuation line must start within this multiple of the previous
/// line's size below it.
const MAX_LINE_GAP_FACTOR: f32 = 2.5;

/// A continuation line's size must be at least this fraction of the largest
/// candidate size.
const MIN_SIZE_RATIO: f32 = 0.7;

/// In the bold-and-centered fallback, a line's midpoint must sit within
/// this fraction of the page width from the page center.
const CENTER_TOLERANCE: f32 = 0.1;

/// The resolved title plus the identities of the lines it consumed; those
/// lines are removed from the corpus before heading analysis.
#[derive(Debug, Default)]
pub struct TitleResolution {
    pub title: String,
    pub consumed: HashSet<LineId>,
}

/// Resolve the document title from page 0.
///
/// Candidates are the page-0 lines in the top half of the page, in
/// `(column, y0)` order. When the candidate sizes spread by at least one
/// point, the title is accumulated greedily from the first largest-size
/// line; with near-uniform sizes it falls back to the first bold lines
/// centered on the page. Any shortfall (no page, no candidates, nothing
/// bold and centered) degrades to an empty title rather than an error.
pub fn resolve_title(lines: &[Line], page0: Option<&PageLayout>) -> TitleResolution {
    let Some(page) = page0 else {
        return TitleResolution::default();
    };

    let mut candidates: Vec<&Line> = lines
        .iter()
        .filter(|l| l.page == 0 && l.bbox.y0 < page.height / 2.0)
        .collect();
    if candidates.is_empty() {
        return TitleResolution::default();
    }
    candidates.sort_by(|a, b| {
        a.column.cmp(&b.column).then(
            a.bbox
                .y0
                .partial_cmp(&b.bbox.y0)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });

    let max_size = candidates.iter().map(|l| l.style.size).max().unwrap_or(0);
    let min_size = candidates.iter().map(|l| l.style.size).min().unwrap_or(0);

    let picked = if max_size - min_size < 1 {
        select_bold_centered(&candidates, page.width)
    } else {
        accumulate_from_largest(&candidates, max_size)
    };

    TitleResolution {
        title: picked
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        consumed: picked.iter().map(|l| l.id()).collect(),
    }
}

/// Greedy forward scan from the first candidate at the maximum size.
///
/// Accumulation stops at the line limit, at a vertical jump larger than
/// [`MAX_LINE_GAP_FACTOR`] times the previous line's size, or when a line
/// falls under [`MIN_SIZE_RATIO`] of the maximum size.
fn accumulate_from_largest<'a>(candidates: &[&'a Line], max_size: i32) -> Vec<&'a Line> {
    let start = match candidates.iter().position(|l| l.style.size == max_size) {
        Some(i) => i,
        None => return Vec::new(),
    };

    let min_size = max_size as f32 * MIN_SIZE_RATIO;
    let mut picked: Vec<&Line> = Vec::new();
    for &line in &candidates[start..] {
        if picked.len() >= MAX_TITLE_LINES {
            break;
        }
        if let Some(last) = picked.last() {
            let gap = (line.bbox.y0 - last.bbox.y0).abs();
            if gap > last.style.size as f32 * MAX_LINE_GAP_FACTOR {
                break;
            }
            if (line.style.size as f32) < min_size {
                break;
            }
        }
        picked.push(line);
    }
    picked
}

/// Fallback for near-uniform sizes: the first bold lines whose horizontal
/// midpoint sits close to the page center.
fn select_bold_centered<'a>(candidates: &[&'a Line], page_width: f32) -> Vec<&'a Line> {
    let center = page_width / 2.0;
    let tolerance = page_width * CENTER_TOLERANCE;
    candidates
        .iter()
        .filter(|l| l.style.bold && (l.bbox.center_x() - center).abs() < tolerance)
        .take(MAX_TITLE_LINES)
        .copied()
        .collect()
}
