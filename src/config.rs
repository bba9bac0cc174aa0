//! Configuration for the reconstruction pipeline.
//!
//! Real documents vary, so the geometric thresholds and the heading
//! pattern are adjustable values rather than hard-coded literals.

/// What to do when a single page's content cannot be parsed.
///
/// Whichever policy is configured is applied uniformly across the
/// document, and every affected page is logged with its page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageErrorPolicy {
    /// Skip the page, keep analyzing the rest of the document (default)
    #[default]
    Skip,
    /// Abort the whole document on the first failing page
    Abort,
}

/// Collation rule used to order the image-asset inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    /// Numeric-aware ordering: `img2.png` precedes `img10.png` (default)
    #[default]
    Natural,
    /// Plain byte-wise ordering
    Lexicographic,
}

/// Tunable parameters for reconstruction.
#[derive(Debug, Clone)]
pub struct ReflowConfig {
    /// Vertical gap (points) above which a paragraph break is inserted.
    ///
    /// A gap of exactly this value does not break; only a strictly larger
    /// gap does. Default: 10.0
    pub paragraph_gap_threshold: f32,

    /// Vertical tolerance (points) within which two elements on the same
    /// page are treated as the same line and ordered left-to-right.
    ///
    /// This band is the stated single-column limitation: it cannot
    /// disambiguate true multi-column flows. Default: 5.0
    pub same_line_tolerance: f32,

    /// File extensions recognized as raster image assets (lowercase,
    /// without the dot).
    pub image_extensions: Vec<String>,

    /// Override for the built-in heading pattern.
    ///
    /// When `Some`, the string is compiled as a regex at segmentation time;
    /// a pattern that does not compile is a configuration error. The match
    /// is expected to start at the heading line and span through the title
    /// line that follows it.
    pub heading_pattern: Option<String>,

    /// Collation rule for the image-asset inventory.
    ///
    /// Placeholder-to-asset binding is positional, so the collation rule
    /// is the single source of truth for which asset a placeholder
    /// resolves to.
    pub inventory_collation: Collation,

    /// Policy for pages whose content stream cannot be parsed.
    pub page_error_policy: PageErrorPolicy,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            paragraph_gap_threshold: 10.0,
            same_line_tolerance: 5.0,
            image_extensions: ["png", "jpg", "jpeg", "gif", "bmp", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            heading_pattern: None,
            inventory_collation: Collation::default(),
            page_error_policy: PageErrorPolicy::default(),
        }
    }
}

impl ReflowConfig {
    /// Set the paragraph vertical-gap threshold in points.
    pub fn with_paragraph_gap_threshold(mut self, points: f32) -> Self {
        self.paragraph_gap_threshold = points;
        self
    }

    /// Set the same-line vertical tolerance in points.
    pub fn with_same_line_tolerance(mut self, points: f32) -> Self {
        self.same_line_tolerance = points;
        self
    }

    /// Set the recognized image extensions (lowercase, without the dot).
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Override the heading-detection pattern.
    pub fn with_heading_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.heading_pattern = Some(pattern.into());
        self
    }

    /// Set the inventory collation rule.
    pub fn with_inventory_collation(mut self, collation: Collation) -> Self {
        self.inventory_collation = collation;
        self
    }

    /// Set the page-error policy.
    pub fn with_page_error_policy(mut self, policy: PageErrorPolicy) -> Self {
        self.page_error_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReflowConfig::default();
        assert_eq!(config.paragraph_gap_threshold, 10.0);
        assert_eq!(config.same_line_tolerance, 5.0);
        assert!(config.image_extensions.iter().any(|e| e == "png"));
        assert!(config.heading_pattern.is_none());
        assert_eq!(config.inventory_collation, Collation::Natural);
        assert_eq!(config.page_error_policy, PageErrorPolicy::Skip);
    }

    #[test]
    fn test_builder_chain() {
        let config = ReflowConfig::default()
            .with_paragraph_gap_threshold(14.0)
            .with_same_line_tolerance(3.0)
            .with_image_extensions(["png"])
            .with_page_error_policy(PageErrorPolicy::Abort);

        assert_eq!(config.paragraph_gap_threshold, 14.0);
        assert_eq!(config.same_line_tolerance, 3.0);
        assert_eq!(config.image_extensions, vec!["png".to_string()]);
        assert_eq!(config.page_error_policy, PageErrorPolicy::Abort);
    }

    #[test]
    fn test_heading_pattern_override() {
        let config = ReflowConfig::default().with_heading_pattern(r"(?m)^Section \d+\n[^\n]+");
        assert!(config.heading_pattern.is_some());
    }
}
