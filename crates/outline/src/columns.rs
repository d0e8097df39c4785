//! Page layout classification: one column or two.

use crate::provider::PageLayout;
use crate::types::BBox;

/// Each side's share of sided blocks must exceed this for the page to count
/// as two-column.
const SIDE_SHARE_THRESHOLD: f32 = 0.3;

/// A block's bounding box is the union of its lines' boxes. Blocks with no
/// lines carry no geometry and are skipped.
fn block_bbox(lines: &[crate::provider::RawLine]) -> Option<BBox> {
    let mut iter = lines.iter().map(|l| l.bbox);
    let first = iter.next()?;
    Some(iter.fold(first, |acc, b| acc.union(&b)))
}

/// Decide whether a page is laid out in one column or two.
///
/// Blocks vote by side relative to the page's horizontal midpoint: a block
/// ending left of the midpoint votes left, one starting right of it votes
/// right, and straddling blocks vote for neither. The page is two-column
/// only when both sides have votes and each side's share of the sided
/// blocks exceeds [`SIDE_SHARE_THRESHOLD`].
pub fn column_count(page: &PageLayout) -> u8 {
    let midpoint = page.width / 2.0;

    let mut left = 0usize;
    let mut right = 0usize;
    for block in &page.blocks {
        let Some(bbox) = block_bbox(&block.lines) else {
            continue;
        };
        if bbox.x1 < midpoint {
            left += 1;
        } else if bbox.x0 > midpoint {
            right += 1;
        }
    }

    let total = left + right;
    if total == 0 {
        return 1;
    }

    if left > 0 && right > 0 {
        let left_share = left as f32 / total as f32;
        let right_share = right as f32 / total as f32;
        if left_share > SIDE_SHARE_THRESHOLD && right_share > SIDE_SHARE_THRESHOLD {
            return 2;
        }
    }

    1
}
