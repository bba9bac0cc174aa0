//! Input-side document model.
//!
//! The pipeline does not parse paged binary formats itself; an external
//! loader does, and hands pages over through the [`DocumentSource`] trait.
//! A source exposes, per page: the height in document units, the positioned
//! text runs, and the ordered drawing operations. Coordinates here are still
//! document-native (origin at the bottom-left of the page); the analyzer is
//! responsible for flipping them.

use crate::error::{Error, Result};
use crate::graphics_state::Matrix;

/// One positioned text run as reported by the source format.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The run's string content
    pub text: String,
    /// Horizontal position in page points (native origin)
    pub x: f32,
    /// Vertical position in page points (native bottom-left origin)
    pub y: f32,
    /// Width as reported by the source format
    pub width: f32,
    /// Height as reported by the source format
    pub height: f32,
}

/// One drawing operation from a page's content stream.
///
/// Only the operations relevant to image placement are distinguished;
/// everything else collapses to [`DrawOp::Other`], which the transform
/// tracker treats as a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Push the current transform onto the save stack
    Save,
    /// Pop the most recently saved transform
    Restore,
    /// Replace the current transform with an absolute matrix
    SetTransform(Matrix),
    /// Paint an image under the current transform
    PaintImage,
    /// Any operation the pipeline does not interpret
    Other,
}

/// Everything the analyzer needs from one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Page height in points, needed for the coordinate flip
    pub height: f32,
    /// Positioned text runs in document-native order
    pub runs: Vec<TextRun>,
    /// Drawing operations in content-stream order
    pub ops: Vec<DrawOp>,
}

/// A loaded paged document.
///
/// Implemented by adapters over external document-parsing libraries.
/// Pages are addressed by 0-based index; a page that cannot be parsed
/// surfaces as an `Err` from [`DocumentSource::page`], which the analyzer
/// handles according to its page-error policy.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// The content of the page at `index` (0-based).
    fn page(&self, index: usize) -> Result<PageContent>;
}

/// An in-memory document, used by tests and by loaders that materialize
/// all pages up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<PageContent>,
}

impl MemoryDocument {
    /// Create a document from fully materialized pages.
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push_page(&mut self, page: PageContent) {
        self.pages.push(page);
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::InputMissing(format!("page {} out of range", index + 1)))
    }
}
