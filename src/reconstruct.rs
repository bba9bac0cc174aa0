//! Reading-order reconstruction.
//!
//! Imposes a deterministic linear order on extracted elements and
//! synthesizes a single annotated text stream: trimmed run content joined
//! with spaces on shared lines, paragraph breaks on large vertical gaps,
//! `--- PAGE <n> ---` markers on page changes, and numbered
//! `[IMAGE_PLACEHOLDER_<k>]` tokens for images.
//!
//! The sort assumes single-column, top-to-bottom, left-to-right reading
//! order; the same-line tolerance band cannot disambiguate true
//! multi-column flows. This is a known limitation, not an error.

use crate::config::ReflowConfig;
use crate::elements::ContentElement;

/// The finished stream plus the diagnostics later stages need.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    /// The linear text stream with all injected markers
    pub text: String,
    /// Number of image placeholders allocated (placeholders are numbered 1..=count)
    pub image_count: u32,
}

/// Turns an unordered element list into the linear text stream.
#[derive(Debug, Clone)]
pub struct ReadingOrderReconstructor {
    paragraph_gap_threshold: f32,
    same_line_tolerance: f32,
}

impl ReadingOrderReconstructor {
    /// Create a reconstructor with explicit thresholds (both in points).
    pub fn new(paragraph_gap_threshold: f32, same_line_tolerance: f32) -> Self {
        Self {
            paragraph_gap_threshold,
            same_line_tolerance,
        }
    }

    /// Create a reconstructor from pipeline configuration.
    pub fn from_config(config: &ReflowConfig) -> Self {
        Self::new(config.paragraph_gap_threshold, config.same_line_tolerance)
    }

    /// Sort elements into reading order.
    ///
    /// Keys in priority order: page ascending, then `y` ascending, except
    /// that elements whose `y` falls within the same-line tolerance of the
    /// line's first element are treated as the same line and ordered by
    /// `x` ascending.
    ///
    /// Runs in two passes so every comparator is a plain total order: a
    /// global sort by `(page, y)`, then a walk that clusters consecutive
    /// elements into lines (a new line starts once `y` exceeds the running
    /// line's anchor by more than the tolerance) and orders each line by
    /// `x`. A single tolerance-band comparator would be intransitive over
    /// chains of slightly jittered baselines.
    pub fn sort(&self, elements: &mut [ContentElement]) {
        elements.sort_by(|a, b| a.page().cmp(&b.page()).then_with(|| a.y().total_cmp(&b.y())));

        let tolerance = self.same_line_tolerance;
        let mut start = 0;
        while start < elements.len() {
            let page = elements[start].page();
            let anchor = elements[start].y();
            let mut end = start + 1;
            while end < elements.len()
                && elements[end].page() == page
                && elements[end].y() - anchor <= tolerance
            {
                end += 1;
            }
            elements[start..end].sort_by(|a, b| a.x().total_cmp(&b.x()));
            start = end;
        }
    }

    /// Sort the elements and build the linear text stream.
    ///
    /// Pure function of the element list; performs no I/O. An empty input
    /// yields an empty stream.
    pub fn reconstruct(&self, mut elements: Vec<ContentElement>) -> Reconstruction {
        self.sort(&mut elements);
        self.reconstruct_sorted(&elements)
    }

    /// Build the linear text stream from elements already in reading order.
    ///
    /// Callers that have sorted with [`sort`](Self::sort) can use this to
    /// avoid a second pass; [`reconstruct`](Self::reconstruct) is the
    /// sort-then-build convenience.
    pub fn reconstruct_sorted(&self, elements: &[ContentElement]) -> Reconstruction {
        let mut text = String::new();
        let mut image_count: u32 = 0;
        let mut previous: Option<&ContentElement> = None;

        for element in elements {
            let mut broke = false;
            if let Some(prev) = previous {
                if element.page() > prev.page() {
                    text.push_str(&format!("\n\n--- PAGE {} ---\n\n", element.page()));
                    broke = true;
                } else {
                    let gap = element.y() - (prev.y() + prev.height());
                    if gap > self.paragraph_gap_threshold {
                        text.push_str("\n\n");
                        broke = true;
                    }
                }
            }

            match element {
                ContentElement::Text { content, .. } => {
                    let same_line = previous.is_some_and(|prev| {
                        element.page() == prev.page()
                            && (element.y() - prev.y()).abs() < self.same_line_tolerance
                    });
                    if same_line && !broke {
                        text.push(' ');
                    }
                    text.push_str(content.trim());
                },
                ContentElement::Image { .. } => {
                    image_count += 1;
                    text.push_str(&format!("\n\n[IMAGE_PLACEHOLDER_{}]\n\n", image_count));
                },
            }

            previous = Some(element);
        }

        // A trailing image would otherwise leave its break at the end of
        // the stream.
        text.truncate(text.trim_end_matches('\n').len());

        log::debug!(
            "reconstructed {} elements into {} chars, {} image placeholders",
            elements.len(),
            text.len(),
            image_count
        );
        Reconstruction { text, image_count }
    }
}

impl Default for ReadingOrderReconstructor {
    fn default() -> Self {
        Self::from_config(&ReflowConfig::default())
    }
}
