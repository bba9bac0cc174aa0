//! Layout analysis: pages in, content elements out.
//!
//! Walks each page of a document source and extracts every positioned text
//! run and image placement as a flat [`ContentElement`] list in
//! document-native (per-page) order. Source coordinates put the origin at
//! the bottom-left of the page; elements are emitted with a top-left
//! origin (`y_top = page_height - y_native`, additionally minus the painted
//! height for images).
//!
//! Each page is analyzed as an independent unit by a pure function with its
//! own transform stack, so no state crosses page boundaries. Cross-page
//! ordering is not this stage's job; the reading-order reconstructor
//! imposes it later.

use crate::config::{PageErrorPolicy, ReflowConfig};
use crate::elements::ContentElement;
use crate::error::{Error, Result};
use crate::graphics_state::TransformTracker;
use crate::source::{DocumentSource, DrawOp, PageContent};

/// Counters produced by one document scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    /// Pages analyzed successfully
    pub pages_processed: u32,
    /// 1-based numbers of pages skipped due to parse failures
    pub pages_skipped: Vec<u32>,
    /// Number of text elements emitted
    pub text_elements: usize,
    /// Number of image elements emitted
    pub image_elements: usize,
}

/// Extracts the full element list for a document.
#[derive(Debug, Clone)]
pub struct LayoutAnalyzer {
    policy: PageErrorPolicy,
}

impl LayoutAnalyzer {
    /// Create an analyzer with the given page-error policy.
    pub fn new(policy: PageErrorPolicy) -> Self {
        Self { policy }
    }

    /// Create an analyzer from pipeline configuration.
    pub fn from_config(config: &ReflowConfig) -> Self {
        Self::new(config.page_error_policy)
    }

    /// Analyze every page of `source` in document order.
    ///
    /// Elements for a page are appended in the order their operations are
    /// encountered. A page whose content fails to parse is handled per the
    /// configured [`PageErrorPolicy`]: skipped (logged and counted) or
    /// fatal for the whole document.
    pub fn analyze(&self, source: &dyn DocumentSource) -> Result<(Vec<ContentElement>, ScanStats)> {
        let mut elements = Vec::new();
        let mut stats = ScanStats::default();

        for index in 0..source.page_count() {
            let page_number = (index + 1) as u32;
            let page = match source.page(index) {
                Ok(page) => page,
                Err(err) => match self.policy {
                    PageErrorPolicy::Skip => {
                        log::warn!("skipping page {}: {}", page_number, err);
                        stats.pages_skipped.push(page_number);
                        continue;
                    },
                    PageErrorPolicy::Abort => {
                        log::error!("aborting on page {}: {}", page_number, err);
                        return Err(Error::PageParse {
                            page: page_number,
                            reason: err.to_string(),
                        });
                    },
                },
            };

            let page_elements = analyze_page(page_number, &page);
            stats.pages_processed += 1;
            stats.text_elements += page_elements.iter().filter(|e| e.is_text()).count();
            stats.image_elements += page_elements.iter().filter(|e| e.is_image()).count();
            log::debug!(
                "page {}: {} elements extracted",
                page_number,
                page_elements.len()
            );
            elements.extend(page_elements);
        }

        log::info!(
            "layout analysis: {} pages, {} text runs, {} images, {} skipped",
            stats.pages_processed,
            stats.text_elements,
            stats.image_elements,
            stats.pages_skipped.len()
        );
        Ok((elements, stats))
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new(PageErrorPolicy::default())
    }
}

/// Extract all elements from a single page.
///
/// Pure function of the page content: text runs are flipped to the
/// top-left origin, and each image paint is resolved against a fresh
/// transform stack scoped to this call.
///
/// # Examples
///
/// ```
/// use page_reflow::analyzer::analyze_page;
/// use page_reflow::source::{DrawOp, PageContent, TextRun};
///
/// let page = PageContent {
///     height: 792.0,
///     runs: vec![TextRun {
///         text: "Title".to_string(),
///         x: 72.0,
///         y: 700.0,
///         width: 60.0,
///         height: 14.0,
///     }],
///     ops: vec![],
/// };
///
/// let elements = analyze_page(1, &page);
/// assert_eq!(elements[0].y(), 92.0);
/// ```
pub fn analyze_page(page_number: u32, page: &PageContent) -> Vec<ContentElement> {
    let mut elements = Vec::with_capacity(page.runs.len());

    for run in &page.runs {
        elements.push(ContentElement::Text {
            page: page_number,
            x: run.x,
            y: page.height - run.y,
            width: run.width,
            height: run.height,
            content: run.text.clone(),
        });
    }

    let mut tracker = TransformTracker::new();
    for op in &page.ops {
        if let DrawOp::PaintImage = op {
            let m = tracker.current();
            let width = m.scale_x();
            let height = m.scale_y();
            elements.push(ContentElement::Image {
                page: page_number,
                x: m.e,
                y: page.height - m.f - height,
                width,
                height,
            });
        } else {
            tracker.process(op);
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics_state::Matrix;
    use crate::source::{MemoryDocument, TextRun};

    fn run(text: &str, x: f32, y: f32) -> TextRun {
        TextRun {
            text: text.to_string(),
            x,
            y,
            width: 100.0,
            height: 12.0,
        }
    }

    #[test]
    fn test_text_coordinate_flip() {
        let page = PageContent {
            height: 792.0,
            runs: vec![run("hello", 72.0, 700.0)],
            ops: vec![],
        };

        let elements = analyze_page(1, &page);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].y(), 92.0);
        assert_eq!(elements[0].x(), 72.0);
        assert_eq!(elements[0].page(), 1);
    }

    #[test]
    fn test_image_geometry_from_transform() {
        let page = PageContent {
            height: 792.0,
            runs: vec![],
            ops: vec![
                DrawOp::Save,
                DrawOp::SetTransform(Matrix::new(100.0, 0.0, 0.0, 50.0, 10.0, 700.0)),
                DrawOp::PaintImage,
                DrawOp::Restore,
            ],
        };

        let elements = analyze_page(1, &page);
        assert_eq!(elements.len(), 1);
        match &elements[0] {
            ContentElement::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                assert_eq!(*x, 10.0);
                assert_eq!(*y, 42.0); // 792 - 700 - 50
                assert_eq!(*width, 100.0);
                assert_eq!(*height, 50.0);
            },
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_scale_yields_positive_size() {
        let page = PageContent {
            height: 600.0,
            runs: vec![],
            ops: vec![
                DrawOp::SetTransform(Matrix::new(-80.0, 0.0, 0.0, -40.0, 5.0, 100.0)),
                DrawOp::PaintImage,
            ],
        };

        let elements = analyze_page(2, &page);
        match &elements[0] {
            ContentElement::Image { width, height, .. } => {
                assert_eq!(*width, 80.0);
                assert_eq!(*height, 40.0);
            },
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_elements_follow_operation_order() {
        let page = PageContent {
            height: 792.0,
            runs: vec![run("a", 0.0, 780.0), run("b", 0.0, 760.0)],
            ops: vec![
                DrawOp::SetTransform(Matrix::new(10.0, 0.0, 0.0, 10.0, 0.0, 0.0)),
                DrawOp::PaintImage,
                DrawOp::SetTransform(Matrix::new(20.0, 0.0, 0.0, 20.0, 0.0, 0.0)),
                DrawOp::PaintImage,
            ],
        };

        let elements = analyze_page(1, &page);
        assert_eq!(elements.len(), 4);
        assert!(elements[0].is_text());
        assert!(elements[1].is_text());
        assert!(elements[2].is_image());
        assert!(elements[3].is_image());
    }

    #[test]
    fn test_analyze_multiple_pages() {
        let doc = MemoryDocument::new(vec![
            PageContent {
                height: 792.0,
                runs: vec![run("page one", 0.0, 700.0)],
                ops: vec![],
            },
            PageContent {
                height: 792.0,
                runs: vec![run("page two", 0.0, 700.0)],
                ops: vec![],
            },
        ]);

        let analyzer = LayoutAnalyzer::default();
        let (elements, stats) = analyzer.analyze(&doc).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].page(), 1);
        assert_eq!(elements[1].page(), 2);
        assert_eq!(stats.pages_processed, 2);
        assert_eq!(stats.text_elements, 2);
        assert!(stats.pages_skipped.is_empty());
    }

    struct FailingPage {
        inner: MemoryDocument,
        failing_index: usize,
    }

    impl DocumentSource for FailingPage {
        fn page_count(&self) -> usize {
            self.inner.page_count()
        }

        fn page(&self, index: usize) -> crate::error::Result<PageContent> {
            if index == self.failing_index {
                Err(Error::PageParse {
                    page: (index + 1) as u32,
                    reason: "corrupt stream".to_string(),
                })
            } else {
                self.inner.page(index)
            }
        }
    }

    fn two_good_one_bad() -> FailingPage {
        FailingPage {
            inner: MemoryDocument::new(vec![
                PageContent {
                    height: 792.0,
                    runs: vec![run("one", 0.0, 700.0)],
                    ops: vec![],
                },
                PageContent {
                    height: 792.0,
                    runs: vec![run("two", 0.0, 700.0)],
                    ops: vec![],
                },
                PageContent {
                    height: 792.0,
                    runs: vec![run("three", 0.0, 700.0)],
                    ops: vec![],
                },
            ]),
            failing_index: 1,
        }
    }

    #[test]
    fn test_skip_policy_records_page_number() {
        let doc = two_good_one_bad();
        let analyzer = LayoutAnalyzer::new(PageErrorPolicy::Skip);
        let (elements, stats) = analyzer.analyze(&doc).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(stats.pages_processed, 2);
        assert_eq!(stats.pages_skipped, vec![2]);
        // Pages after the failure are still processed independently.
        assert_eq!(elements[1].page(), 3);
    }

    #[test]
    fn test_abort_policy_fails_fast() {
        let doc = two_good_one_bad();
        let analyzer = LayoutAnalyzer::new(PageErrorPolicy::Abort);
        let err = analyzer.analyze(&doc).unwrap_err();
        match err {
            Error::PageParse { page, .. } => assert_eq!(page, 2),
            other => panic!("expected PageParse, got {:?}", other),
        }
    }
}
