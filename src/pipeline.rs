//! End-to-end orchestration of the reconstruction stages.
//!
//! Runs layout analysis, reading-order reconstruction, and chapter
//! segmentation over a [`DocumentSource`], optionally writing the
//! intermediate artifacts (element list as JSONL, reconstructed text as a
//! plain blob) to a directory. Finalization runs separately (see
//! [`crate::finalize`]) because its input comes from an external
//! enrichment stage. Data flows strictly forward; each stage consumes an
//! immutable input and produces a new immutable output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analyzer::{LayoutAnalyzer, ScanStats};
use crate::config::ReflowConfig;
use crate::elements::{self, ContentElement};
use crate::error::Result;
use crate::reconstruct::ReadingOrderReconstructor;
use crate::segmenter::{Chapter, ChapterSegmenter};
use crate::source::DocumentSource;

/// Diagnostics collected over one pipeline run.
///
/// Recoverable problems (skipped pages, unresolved placeholders) never
/// stop the pipeline; they are reported here as counts at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Pages analyzed successfully
    pub pages_processed: u32,
    /// 1-based numbers of pages skipped due to parse failures
    pub pages_skipped: Vec<u32>,
    /// Text elements extracted
    pub text_elements: usize,
    /// Image elements extracted
    pub image_elements: usize,
    /// Image placeholders allocated in the text stream
    pub placeholder_count: u32,
    /// Chapters detected (including front matter or fallback)
    pub chapter_count: usize,
}

impl RunReport {
    fn from_stages(stats: &ScanStats, placeholder_count: u32, chapter_count: usize) -> Self {
        Self {
            pages_processed: stats.pages_processed,
            pages_skipped: stats.pages_skipped.clone(),
            text_elements: stats.text_elements,
            image_elements: stats.image_elements,
            placeholder_count,
            chapter_count,
        }
    }
}

/// Everything the first three stages produce.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Elements in reconstructed reading order
    pub elements: Vec<ContentElement>,
    /// The linear text stream
    pub text: String,
    /// Detected chapters
    pub chapters: Vec<Chapter>,
    /// Run diagnostics
    pub report: RunReport,
}

/// The reconstruction pipeline: analysis, reading order, segmentation.
#[derive(Debug, Clone, Default)]
pub struct ReflowPipeline {
    config: ReflowConfig,
}

impl ReflowPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: ReflowConfig) -> Self {
        Self { config }
    }

    /// Run the three in-memory stages over `source`.
    pub fn run(&self, source: &dyn DocumentSource) -> Result<PipelineOutput> {
        let analyzer = LayoutAnalyzer::from_config(&self.config);
        let (mut elements, stats) = analyzer.analyze(source)?;

        let reconstructor = ReadingOrderReconstructor::from_config(&self.config);
        reconstructor.sort(&mut elements);
        let reconstruction = reconstructor.reconstruct_sorted(&elements);

        let segmenter = ChapterSegmenter::from_config(&self.config);
        let chapters = segmenter.segment(&reconstruction.text)?;

        let report = RunReport::from_stages(&stats, reconstruction.image_count, chapters.len());
        log::info!(
            "pipeline run: {} pages, {} chapters, {} placeholders",
            report.pages_processed,
            report.chapter_count,
            report.placeholder_count
        );

        Ok(PipelineOutput {
            elements,
            text: reconstruction.text,
            chapters,
            report,
        })
    }

    /// Run the pipeline and write the intermediate artifacts under `out_dir`:
    /// `elements.jsonl` (one element record per line) and
    /// `reconstructed.txt` (the linear text stream).
    pub fn run_with_artifacts(
        &self,
        source: &dyn DocumentSource,
        out_dir: &Path,
    ) -> Result<PipelineOutput> {
        let output = self.run(source)?;

        fs::create_dir_all(out_dir)?;
        let mut writer = BufWriter::new(File::create(out_dir.join("elements.jsonl"))?);
        elements::write_jsonl(&mut writer, &output.elements)?;
        writer.flush()?;
        fs::write(out_dir.join("reconstructed.txt"), &output.text)?;

        Ok(output)
    }
}
