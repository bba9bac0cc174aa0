//! Chapter segmentation via heading heuristics.
//!
//! Splits the linear text stream into titled chapters by scanning for
//! heading lines: `Chapter <n>`, `Part <n>`, or a bare one-to-two-digit
//! number at the start of a line, each immediately followed by a title
//! line. The detector is a heuristic, not a grammar; a stray page number
//! followed by a text line is a known false-positive risk.
//!
//! Chapters partition the stream: each chapter's content runs from its own
//! heading (included) to the next heading, any text before the first
//! heading becomes a front-matter chapter, and a stream with no headings
//! at all becomes a single "Full Document" chapter.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ReflowConfig;
use crate::error::{Error, Result};

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(
        r"(?m)^[ \t]*(?i:chapter[ \t]+\d+|part[ \t]+\d+|\d{1,2})[ \t]*(?:\r?\n)+[ \t]*\S[^\r\n]*"
    )
    .unwrap();
}

/// Title used for text preceding the first detected heading.
pub const FRONT_MATTER_TITLE: &str = "Introduction / Front Matter";

/// Title used when no headings are detected anywhere.
pub const FALLBACK_TITLE: &str = "Full Document";

/// One detected chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Synthesized title, `"<heading>: <title line>"` for detected headings
    pub title: String,
    /// Verbatim slice of the stream covered by this chapter
    pub content: String,
}

/// Splits a linear text stream into titled chapters.
#[derive(Debug, Clone)]
pub struct ChapterSegmenter {
    pattern: Option<String>,
}

impl ChapterSegmenter {
    /// Create a segmenter using the built-in heading pattern.
    pub fn new() -> Self {
        Self { pattern: None }
    }

    /// Create a segmenter from pipeline configuration, honoring a
    /// heading-pattern override if one is set.
    pub fn from_config(config: &ReflowConfig) -> Self {
        Self {
            pattern: config.heading_pattern.clone(),
        }
    }

    /// Segment `stream` into chapters.
    ///
    /// Returns an empty list for an empty stream. A non-empty stream with
    /// no heading matches yields exactly one chapter titled
    /// [`FALLBACK_TITLE`] containing the entire input.
    pub fn segment(&self, stream: &str) -> Result<Vec<Chapter>> {
        if stream.is_empty() {
            return Ok(Vec::new());
        }

        let override_re;
        let pattern: &Regex = match &self.pattern {
            Some(source) => {
                override_re = Regex::new(source).map_err(|e| {
                    Error::InvalidConfig(format!("heading pattern does not compile: {}", e))
                })?;
                &override_re
            },
            None => &HEADING_RE,
        };

        let starts: Vec<(usize, String)> = pattern
            .find_iter(stream)
            .map(|m| (m.start(), synthesize_title(m.as_str())))
            .collect();

        if starts.is_empty() {
            log::info!("no headings detected, falling back to a single chapter");
            return Ok(vec![Chapter {
                title: FALLBACK_TITLE.to_string(),
                content: stream.to_string(),
            }]);
        }

        let mut chapters = Vec::with_capacity(starts.len() + 1);
        if starts[0].0 > 0 {
            chapters.push(Chapter {
                title: FRONT_MATTER_TITLE.to_string(),
                content: stream[..starts[0].0].to_string(),
            });
        }

        for (i, (start, title)) in starts.iter().enumerate() {
            let end = starts.get(i + 1).map_or(stream.len(), |(next, _)| *next);
            chapters.push(Chapter {
                title: title.clone(),
                content: stream[*start..end].to_string(),
            });
        }

        log::debug!("segmented stream into {} chapters", chapters.len());
        Ok(chapters)
    }
}

impl Default for ChapterSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `"<heading line>: <title line>"` from a heading match, collapsed
/// to a single line and trimmed.
fn synthesize_title(matched: &str) -> String {
    match matched.split_once('\n') {
        Some((heading, title)) => format!("{}: {}", heading.trim(), title.trim()),
        None => matched.trim().to_string(),
    }
}
