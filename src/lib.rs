//! # page_reflow
//!
//! Reconstructs paginated documents into a linear, structured,
//! machine-consumable representation: ordered text with paragraph and page
//! boundaries, numbered image placeholders, chapter segmentation, and
//! finalized sections with resolved image-asset references.
//!
//! ## Pipeline
//!
//! Data flows strictly forward through four stages:
//!
//! 1. **Layout analysis** ([`analyzer`]) — extracts every positioned text
//!    run and image placement per page, resolving image geometry through a
//!    save/restore transform stack ([`graphics_state`]).
//! 2. **Reading-order reconstruction** ([`reconstruct`]) — sorts elements
//!    into top-to-bottom, left-to-right order and synthesizes one annotated
//!    text stream with page breaks, paragraph breaks, and image
//!    placeholders.
//! 3. **Chapter segmentation** ([`segmenter`]) — splits the stream into
//!    titled chapters via heading heuristics.
//! 4. **Finalization** ([`finalize`]) — resolves placeholder tokens in
//!    structured sections against a sorted image-asset inventory.
//!
//! The document loader itself is an external collaborator: anything that
//! implements [`source::DocumentSource`] can feed the pipeline.
//!
//! ## Quick start
//!
//! ```
//! use page_reflow::config::ReflowConfig;
//! use page_reflow::pipeline::ReflowPipeline;
//! use page_reflow::source::{MemoryDocument, PageContent, TextRun};
//!
//! # fn main() -> page_reflow::error::Result<()> {
//! let doc = MemoryDocument::new(vec![PageContent {
//!     height: 792.0,
//!     runs: vec![TextRun {
//!         text: "Hello".to_string(),
//!         x: 72.0,
//!         y: 700.0,
//!         width: 40.0,
//!         height: 12.0,
//!     }],
//!     ops: vec![],
//! }]);
//!
//! let pipeline = ReflowPipeline::new(ReflowConfig::default());
//! let output = pipeline.run(&doc)?;
//! assert_eq!(output.text, "Hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Known limitation
//!
//! The reading-order sort assumes single-column, top-to-bottom,
//! left-to-right layout. Multi-column documents are out of scope.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input model and graphics state
pub mod graphics_state;
pub mod source;

// Pipeline stages
pub mod analyzer;
pub mod elements;
pub mod finalize;
pub mod reconstruct;
pub mod segmenter;

// Configuration and orchestration
pub mod config;
pub mod pipeline;

pub use config::{Collation, PageErrorPolicy, ReflowConfig};
pub use elements::ContentElement;
pub use error::{Error, Result};
pub use pipeline::{PipelineOutput, ReflowPipeline, RunReport};
