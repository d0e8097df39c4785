//! The document layout provider contract.
//!
//! Parsing a document binary into positioned text is an external concern.
//! Whatever does it (a PDF renderer, a layout-dump file, a test fixture)
//! implements [`LayoutProvider`] and hands the core pure data: per page, the
//! page dimensions, the text blocks with their lines and spans, and any
//! detected table regions. The provider's handle to the underlying document
//! is released when the provider is dropped, on success and failure paths
//! alike.

use serde::{Deserialize, Serialize};

use crate::types::{BBox, TableArea};
use crate::OutlineError;

// ---------------------------------------------------------------------------
// Contract data types
// ---------------------------------------------------------------------------

/// A single text span: one run of characters in one font at one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    pub text: String,
    /// Full font name as reported by the layout engine (used for bold
    /// detection).
    pub font: String,
    /// Unrounded font size in points.
    pub size: f32,
}

/// One visual line: a bbox plus its ordered spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    pub bbox: BBox,
    pub spans: Vec<RawSpan>,
}

/// One text block. Blocks carry no geometry of their own; image-only blocks
/// arrive with no lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

/// Everything the core needs to know about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<RawBlock>,
    /// Table regions detected on this page, if any.
    #[serde(default)]
    pub tables: Vec<TableArea>,
}

/// A fully materialized document: the serde form of this type is the layout
/// dump interchange format consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Source of parsed page layouts for a single document.
pub trait LayoutProvider {
    fn page_count(&self) -> usize;

    /// Produce the layout of the page at `index` (zero-based). Failures here
    /// are fatal for the document and propagate to the caller.
    fn page(&self, index: usize) -> Result<PageLayout, OutlineError>;
}

impl LayoutProvider for DocumentLayout {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageLayout, OutlineError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| OutlineError::Provider(format!("page {} out of range", index)))
    }
}
