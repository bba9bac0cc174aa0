//! Extracted content elements.
//!
//! A [`ContentElement`] is one atomic extracted unit: a text run or an image
//! placement, with page-space geometry. Coordinates use a top-left origin
//! (the analyzer flips document-native coordinates on the way in), `page`
//! is 1-based, and width/height are always non-negative. Elements are
//! created once during layout analysis and are immutable afterward.
//!
//! The module also reads and writes the element list as a JSONL file, one
//! record per line, which is the pipeline's first intermediate artifact.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One extracted unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentElement {
    /// A positioned text run
    Text {
        /// 1-based page number
        page: u32,
        /// Horizontal position in page points
        x: f32,
        /// Vertical position in page points, top-left origin
        y: f32,
        /// Run width in points
        width: f32,
        /// Run height in points
        height: f32,
        /// The run's string content
        content: String,
    },
    /// An image placement
    Image {
        /// 1-based page number
        page: u32,
        /// Horizontal position in page points
        x: f32,
        /// Vertical position in page points, top-left origin
        y: f32,
        /// Painted width in points (always non-negative)
        width: f32,
        /// Painted height in points (always non-negative)
        height: f32,
    },
}

impl ContentElement {
    /// The element's 1-based page number.
    pub fn page(&self) -> u32 {
        match self {
            ContentElement::Text { page, .. } | ContentElement::Image { page, .. } => *page,
        }
    }

    /// Horizontal position in page points.
    pub fn x(&self) -> f32 {
        match self {
            ContentElement::Text { x, .. } | ContentElement::Image { x, .. } => *x,
        }
    }

    /// Vertical position in page points (top-left origin).
    pub fn y(&self) -> f32 {
        match self {
            ContentElement::Text { y, .. } | ContentElement::Image { y, .. } => *y,
        }
    }

    /// Element height in points.
    pub fn height(&self) -> f32 {
        match self {
            ContentElement::Text { height, .. } | ContentElement::Image { height, .. } => *height,
        }
    }

    /// Check if this is a text element.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentElement::Text { .. })
    }

    /// Check if this is an image element.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentElement::Image { .. })
    }

    /// The text content, if this is a text element.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentElement::Text { content, .. } => Some(content),
            ContentElement::Image { .. } => None,
        }
    }
}

/// Write elements as JSONL, one record per line.
pub fn write_jsonl<W: Write>(writer: &mut W, elements: &[ContentElement]) -> Result<()> {
    for element in elements {
        serde_json::to_writer(&mut *writer, element)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Read elements from a JSONL stream. Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<ContentElement>> {
    let mut elements = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        elements.push(serde_json::from_str(&line)?);
    }
    Ok(elements)
}
