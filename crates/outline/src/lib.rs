//! Heuristic document-outline extraction.
//!
//! Given an already-parsed representation of a document's pages -- text
//! lines with bounding boxes and font spans, plus detected table regions,
//! supplied by a [`provider::LayoutProvider`] -- the pipeline infers a title
//! and a three-level heading outline from pure geometry and typography.
//! Every decision is a rule; there is no layout model and no training data.
//!
//! # Pipeline
//!
//! ```text
//! PageLayout[]  ->  Line[]     ->  Line[]    ->  title + Line[]  ->  DocumentOutline
//!   per page        extract +      noise         title               heading
//!                   columns        filter        resolver            classifier
//! ```
//!
//! Analysis is synchronous, deterministic, and side-effect free; every
//! derived value (ignore set, table areas, body style) is document-scoped
//! and threaded through as plain data, so batches of documents can be
//! processed on independent workers with no shared state.

use thiserror::Error;

pub mod cleanup;
pub mod columns;
pub mod extract;
pub mod filter;
pub mod headings;
pub mod provider;
pub mod title;
pub mod types;

pub use provider::{DocumentLayout, LayoutProvider, PageLayout, RawBlock, RawLine, RawSpan};
pub use types::*;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("layout provider error: {0}")]
    Provider(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract the outline of one document through a [`LayoutProvider`].
///
/// The document is read fully before analysis begins; provider failures are
/// fatal for this document only.
pub fn extract_outline(provider: &dyn LayoutProvider) -> Result<DocumentOutline, OutlineError> {
    let mut pages = Vec::with_capacity(provider.page_count());
    for index in 0..provider.page_count() {
        pages.push(provider.page(index)?);
    }
    Ok(analyze_pages(&pages))
}

/// Run the full analysis over materialized pages.
///
/// Infallible by design: documents that yield no lines (empty, or fully
/// filtered as noise) produce an empty title and outline, and a failed
/// title resolution degrades to an empty title.
pub fn analyze_pages(pages: &[PageLayout]) -> DocumentOutline {
    let ignored = filter::detect_repeating_lines(pages);
    if !ignored.is_empty() {
        log::info!(
            "detected {} repeating lines to ignore as headers/footers",
            ignored.len()
        );
    }

    let table_pages: Vec<usize> = pages
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.tables.is_empty())
        .map(|(i, _)| i)
        .collect();
    if !table_pages.is_empty() {
        log::info!("detected tables on pages: {:?}", table_pages);
    }

    // Assemble the candidate corpus: extracted lines minus noise.
    let mut corpus: Vec<types::Line> = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let column_count = columns::column_count(page);
        for line in extract::extract_lines(index, page, column_count) {
            if filter::in_table(&line.bbox, &page.tables) {
                continue;
            }
            if ignored.contains(&line.text) {
                continue;
            }
            if filter::is_date_line(&line.text) {
                continue;
            }
            if filter::is_page_marker(&line.text) {
                continue;
            }
            corpus.push(line);
        }
    }

    if corpus.is_empty() {
        return DocumentOutline::empty();
    }

    let resolution = title::resolve_title(&corpus, pages.first());
    if !resolution.consumed.is_empty() {
        log::info!(
            "identified title {:?}; excluding {} lines from heading analysis",
            resolution.title,
            resolution.consumed.len()
        );
        corpus.retain(|line| !resolution.consumed.contains(&line.id()));
    }

    let outline = headings::build_outline(&corpus);
    DocumentOutline {
        title: resolution.title,
        outline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BBox;

    // -- Helpers for building page layouts --------------------------------

    fn make_span(text: &str, font: &str, size: f32) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font: font.to_string(),
            size,
        }
    }

    /// A single-span line whose bbox height tracks the font size.
    fn text_line(text: &str, font: &str, size: f32, x0: f32, x1: f32, y0: f32) -> RawLine {
        RawLine {
            bbox: BBox::new(x0, y0, x1, y0 + size * 1.2),
            spans: vec![make_span(text, font, size)],
        }
    }

    fn make_block(lines: Vec<RawLine>) -> RawBlock {
        RawBlock { lines }
    }

    fn make_page(width: f32, height: f32, blocks: Vec<RawBlock>) -> PageLayout {
        PageLayout {
            width,
            height,
            blocks,
            tables: vec![],
        }
    }

    fn paragraph_text() -> String {
        "the quick brown fox jumps over the lazy dog and keeps going "
            .repeat(3)
            .trim()
            .to_string()
    }

    /// A page of plain 10pt paragraphs in the vertical middle of the page.
    fn body_page() -> PageLayout {
        let text = paragraph_text();
        make_page(
            600.0,
            800.0,
            vec![make_block(vec![
                text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 350.0),
                text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 370.0),
                text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 390.0),
            ])],
        )
    }

    // =====================================================================
    // Degenerate documents
    // =====================================================================

    #[test]
    fn test_empty_document() {
        let out = analyze_pages(&[]);
        assert_eq!(out, DocumentOutline::empty());
    }

    #[test]
    fn test_document_with_only_whitespace_lines() {
        let page = make_page(
            600.0,
            800.0,
            vec![make_block(vec![text_line(
                "   ",
                "Helvetica",
                10.0,
                50.0,
                550.0,
                300.0,
            )])],
        );
        let out = analyze_pages(&[page]);
        assert_eq!(out, DocumentOutline::empty());
    }

    #[test]
    fn test_extract_outline_through_provider() {
        let doc = DocumentLayout {
            pages: vec![body_page()],
        };
        let via_provider = extract_outline(&doc).unwrap();
        assert_eq!(via_provider, analyze_pages(&doc.pages));
    }

    // =====================================================================
    // Scenario: 2-column page with a single chapter heading
    // =====================================================================

    fn chapter_document() -> Vec<PageLayout> {
        let text = paragraph_text();

        // Page 0: plain paragraphs (title resolution finds nothing bold or
        // oversized, so the title stays empty).
        let page0 = body_page();

        // Page 1: two columns; "CHAPTER ONE" bold 18pt tops the left column.
        let page1 = make_page(
            600.0,
            800.0,
            vec![
                make_block(vec![text_line(
                    "CHAPTER ONE",
                    "Times-Bold",
                    18.0,
                    40.0,
                    200.0,
                    50.0,
                )]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 40.0, 280.0, 90.0),
                    text_line(&text, "Helvetica", 10.0, 40.0, 280.0, 110.0),
                ]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 320.0, 560.0, 90.0),
                    text_line(&text, "Helvetica", 10.0, 320.0, 560.0, 110.0),
                ]),
                make_block(vec![text_line(
                    &text,
                    "Helvetica",
                    10.0,
                    320.0,
                    560.0,
                    400.0,
                )]),
            ],
        );

        vec![page0, page1, body_page(), body_page(), body_page()]
    }

    #[test]
    fn test_two_column_chapter_heading() {
        let out = analyze_pages(&chapter_document());
        assert_eq!(out.title, "");
        assert_eq!(
            out.outline,
            vec![OutlineEntry {
                level: HeadingLevel::H1,
                text: "CHAPTER ONE".to_string(),
                page: 1,
            }]
        );
    }

    #[test]
    fn test_determinism() {
        let pages = chapter_document();
        let first = analyze_pages(&pages);
        let second = analyze_pages(&pages);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    // =====================================================================
    // Scenario: title-page-only document
    // =====================================================================

    #[test]
    fn test_title_page_only_document() {
        let page = make_page(
            600.0,
            800.0,
            vec![
                make_block(vec![text_line(
                    "Annual Report",
                    "Helvetica-Bold",
                    24.0,
                    200.0,
                    400.0,
                    100.0,
                )]),
                make_block(vec![
                    text_line("Acme Corporation", "Helvetica", 10.0, 240.0, 360.0, 500.0),
                    text_line("Internal use only", "Helvetica", 10.0, 240.0, 360.0, 520.0),
                ]),
            ],
        );

        let out = analyze_pages(&[page]);
        assert_eq!(out.title, "Annual Report");
        assert!(out.outline.is_empty(), "title page must yield no headings");
    }

    // =====================================================================
    // Scenario: "Page N of M" markers never survive
    // =====================================================================

    #[test]
    fn test_page_marker_excluded_regardless_of_style() {
        let text = paragraph_text();
        let page = make_page(
            600.0,
            800.0,
            vec![
                // Oversized marker in the top half; would dominate the title
                // and the hierarchy if it were admitted.
                make_block(vec![text_line(
                    "Page 3 of 10",
                    "Helvetica-Bold",
                    30.0,
                    150.0,
                    450.0,
                    60.0,
                )]),
                make_block(vec![text_line(
                    "Overview",
                    "Helvetica",
                    14.0,
                    50.0,
                    200.0,
                    500.0,
                )]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 540.0),
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 560.0),
                ]),
            ],
        );

        let out = analyze_pages(&[page]);
        assert_ne!(out.title, "Page 3 of 10");
        assert!(out.outline.iter().all(|e| e.text != "Page 3 of 10"));
        assert_eq!(
            out.outline,
            vec![OutlineEntry {
                level: HeadingLevel::H1,
                text: "Overview".to_string(),
                page: 0,
            }]
        );
    }

    // =====================================================================
    // Property: header/footer idempotence
    // =====================================================================

    #[test]
    fn test_repeating_header_absent_from_all_pages() {
        // "Confidential Draft" (bold 14pt, header band) would qualify as a
        // heading on every page if it were not suppressed document-wide --
        // including pages 0 and 7, outside the scanned middle half.
        let text = paragraph_text();
        let pages: Vec<PageLayout> = (0..8)
            .map(|_| {
                make_page(
                    600.0,
                    800.0,
                    vec![
                        make_block(vec![text_line(
                            "Confidential Draft",
                            "Helvetica-Bold",
                            14.0,
                            50.0,
                            250.0,
                            20.0,
                        )]),
                        make_block(vec![
                            text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 350.0),
                            text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 370.0),
                        ]),
                    ],
                )
            })
            .collect();

        let out = analyze_pages(&pages);
        assert!(
            out.outline.iter().all(|e| e.text != "Confidential Draft"),
            "suppressed header leaked into the outline: {:?}",
            out.outline
        );
        assert_ne!(out.title, "Confidential Draft");
    }

    // =====================================================================
    // Property: table exclusion
    // =====================================================================

    #[test]
    fn test_lines_in_tables_never_become_headings() {
        let text = paragraph_text();
        let mut page = make_page(
            600.0,
            800.0,
            vec![
                make_block(vec![text_line(
                    "Quarterly Figures",
                    "Helvetica-Bold",
                    20.0,
                    60.0,
                    300.0,
                    210.0,
                )]),
                make_block(vec![text_line(
                    "Results",
                    "Helvetica",
                    14.0,
                    50.0,
                    200.0,
                    500.0,
                )]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 540.0),
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 560.0),
                ]),
            ],
        );
        page.tables = vec![BBox::new(50.0, 200.0, 550.0, 400.0)];

        let out = analyze_pages(&[page]);
        assert!(
            out.outline.iter().all(|e| e.text != "Quarterly Figures"),
            "table line leaked into the outline: {:?}",
            out.outline
        );
        assert_ne!(out.title, "Quarterly Figures");
        assert_eq!(out.outline.len(), 1);
        assert_eq!(out.outline[0].text, "Results");
    }

    // =====================================================================
    // Property: title exclusivity
    // =====================================================================

    #[test]
    fn test_title_lines_never_reappear_in_outline() {
        let text = paragraph_text();
        let page0 = make_page(
            600.0,
            800.0,
            vec![
                make_block(vec![text_line(
                    "Report Title",
                    "Helvetica-Bold",
                    24.0,
                    150.0,
                    450.0,
                    80.0,
                )]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 350.0),
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 370.0),
                ]),
            ],
        );
        let page1 = make_page(
            600.0,
            800.0,
            vec![
                make_block(vec![text_line(
                    "Introduction",
                    "Helvetica-Bold",
                    16.0,
                    50.0,
                    250.0,
                    100.0,
                )]),
                make_block(vec![
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 140.0),
                    text_line(&text, "Helvetica", 10.0, 50.0, 550.0, 160.0),
                ]),
            ],
        );

        let out = analyze_pages(&[page0, page1]);
        assert_eq!(out.title, "Report Title");
        assert!(out.outline.iter().all(|e| e.text != "Report Title"));
        assert_eq!(out.outline.len(), 1);
        assert_eq!(out.outline[0].text, "Introduction");
    }
}
