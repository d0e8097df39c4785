use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinate space.
///
/// Invariants: `x0 < x1` and `y0 < y1` (y grows downward, so `y0` is the top
/// edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        BBox { x0, y0, x1, y1 }
    }

    /// Edge-inclusive containment: `other` lies fully within `self`.
    pub fn contains(&self, other: &BBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Horizontal midpoint of the box.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Grow the box to cover `other` as well.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A page-scoped table region. Lines fully contained in one are dropped
/// before the corpus is assembled.
pub type TableArea = BBox;

/// A line's dominant `(size, bold)` pair.
///
/// The derived ordering is lexicographic on `(size, bold)` with
/// `false < true`, so a descending sort ranks larger sizes first and bold
/// before non-bold at equal size -- exactly the heading-hierarchy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Style {
    pub size: i32,
    pub bold: bool,
}

impl Style {
    /// Fallback style for lines with no spans and for documents where no
    /// body style can be deduced.
    pub const DEFAULT: Style = Style {
        size: 10,
        bold: false,
    };

    pub fn new(size: i32, bold: bool) -> Self {
        Style { size, bold }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.size, if self.bold { "bold" } else { "regular" })
    }
}

/// Stable identity of a line within a document: `(page, y0 bits)`.
///
/// The top edge at sub-pixel precision is assumed distinct per rendered line
/// on a page, so the bit pattern of `y0` is a faithful stand-in for the
/// coordinate itself while staying hashable.
pub type LineId = (usize, u32);

/// One visually contiguous run of spans sharing a baseline, as admitted to
/// the candidate corpus.
///
/// Immutable after extraction except for `text` and `bbox.y1`, which are
/// extended exactly once when adjacent heading fragments merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Zero-based page index.
    pub page: usize,
    /// Concatenated, whitespace-trimmed span text.
    pub text: String,
    /// Dominant style of the line.
    pub style: Style,
    pub bbox: BBox,
    /// 0 (left/primary) or 1 (right), from the page's column decision.
    pub column: u8,
}

impl Line {
    pub fn id(&self) -> LineId {
        (self.page, self.bbox.y0.to_bits())
    }

    /// Whitespace-separated token count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Character length of the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Outline depth. The hierarchy is capped at three levels; candidates whose
/// style ranks deeper are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a zero-based style rank to a level. Ranks past the third have no
    /// level.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One externally visible outline entry. `text` may be the concatenation of
/// several merged line fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: usize,
}

/// The full result for one document. Field order matches the output
/// contract consumed by downstream serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// The result for documents that yield no lines at all.
    pub fn empty() -> Self {
        DocumentOutline {
            title: String::new(),
            outline: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains_inner() {
        let table = BBox::new(10.0, 10.0, 200.0, 100.0);
        let line = BBox::new(20.0, 20.0, 180.0, 30.0);
        assert!(table.contains(&line));
    }

    #[test]
    fn test_bbox_contains_is_edge_inclusive() {
        let table = BBox::new(10.0, 10.0, 200.0, 100.0);
        assert!(table.contains(&table));
    }

    #[test]
    fn test_bbox_contains_partial_overlap() {
        let table = BBox::new(10.0, 10.0, 200.0, 100.0);
        let line = BBox::new(5.0, 20.0, 180.0, 30.0);
        assert!(!table.contains(&line), "left edge sticks out");
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!((u.x0, u.y0, u.x1, u.y1), (0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_style_descending_order_ranks_bold_first() {
        let mut styles = vec![
            Style::new(12, false),
            Style::new(14, false),
            Style::new(14, true),
            Style::new(18, false),
        ];
        styles.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            styles,
            vec![
                Style::new(18, false),
                Style::new(14, true),
                Style::new(14, false),
                Style::new(12, false),
            ]
        );
    }

    #[test]
    fn test_heading_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(3), None);
    }

    #[test]
    fn test_outline_serializes_with_contract_field_order() {
        let out = DocumentOutline {
            title: "T".to_string(),
            outline: vec![OutlineEntry {
                level: HeadingLevel::H2,
                text: "Intro".to_string(),
                page: 3,
            }],
        };
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","outline":[{"level":"H2","text":"Intro","page":3}]}"#
        );
    }

    #[test]
    fn test_line_id_distinguishes_pages() {
        let mk = |page, y0| Line {
            page,
            text: "x".to_string(),
            style: Style::DEFAULT,
            bbox: BBox::new(0.0, y0, 10.0, y0 + 10.0),
            column: 0,
        };
        assert_ne!(mk(0, 50.0).id(), mk(1, 50.0).id());
        assert_ne!(mk(0, 50.0).id(), mk(0, 50.5).id());
        assert_eq!(mk(0, 50.0).id(), mk(0, 50.0).id());
    }
}
