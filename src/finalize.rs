//! Finalization: placeholder resolution against extracted image assets.
//!
//! Takes structured sections (produced by an external enrichment stage,
//! one JSONL record per line) and a directory of extracted image files,
//! and resolves every `[IMAGE_PLACEHOLDER_<k>]` token to a concrete image
//! reference. Binding is purely positional: the inventory is sorted with a
//! natural numeric-aware comparator and placeholder `k` maps to inventory
//! index `k - 1`. Content-addressed placeholder keys would survive
//! extraction-order changes between runs and are a possible redesign.

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{Collation, ReflowConfig};
use crate::error::{Error, Result};

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\[IMAGE_PLACEHOLDER_(\d+)\]").unwrap();
}

/// One structured section record, as emitted by the enrichment stage.
///
/// All fields except `content` pass through finalization verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Book-level title
    pub book_title: String,
    /// Chapter-level title
    pub chapter_title: String,
    /// Subsection title
    pub subsection_title: String,
    /// Section body, holding zero or more placeholder tokens
    pub content: String,
}

/// Result of resolving a set of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionOutcome {
    /// Sections in input order with placeholder tokens resolved
    pub sections: Vec<Section>,
    /// One warning per placeholder that referenced a missing image
    pub warnings: Vec<String>,
}

/// Resolves placeholders in structured sections against an image directory.
#[derive(Debug, Clone)]
pub struct Finalizer {
    extensions: Vec<String>,
    collation: Collation,
}

impl Finalizer {
    /// Create a finalizer recognizing the given image extensions
    /// (lowercase, without the dot), using natural inventory collation.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            collation: Collation::Natural,
        }
    }

    /// Create a finalizer from pipeline configuration.
    pub fn from_config(config: &ReflowConfig) -> Self {
        Self {
            extensions: config.image_extensions.clone(),
            collation: config.inventory_collation,
        }
    }

    /// Build the sorted image inventory for `dir`.
    ///
    /// Lists the directory, filters to recognized raster extensions, and
    /// sorts with the natural comparator so `img2.png` precedes
    /// `img10.png`. A missing or empty directory yields an empty inventory
    /// (placeholders will then all resolve to warnings), not an error.
    pub fn build_inventory(&self, dir: &Path) -> Vec<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("image directory {} unreadable: {}", dir.display(), err);
                return Vec::new();
            },
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        let ext = ext.to_ascii_lowercase();
                        self.extensions.iter().any(|known| *known == ext)
                    })
            })
            .collect();

        match self.collation {
            Collation::Natural => names.sort_by(|a, b| natural_cmp(a, b)),
            Collation::Lexicographic => names.sort(),
        }
        log::info!("image inventory: {} assets in {}", names.len(), dir.display());
        names
    }

    /// Resolve every placeholder in every section.
    ///
    /// In-range placeholders become Markdown image references into
    /// `image_dir`; out-of-range ones stay verbatim and produce one
    /// warning each. Section order and non-content fields are preserved.
    pub fn resolve(
        &self,
        sections: Vec<Section>,
        image_dir: &Path,
        inventory: &[String],
    ) -> ResolutionOutcome {
        let mut warnings = Vec::new();

        let sections = sections
            .into_iter()
            .map(|mut section| {
                let resolved =
                    PLACEHOLDER_RE.replace_all(&section.content, |caps: &regex::Captures<'_>| {
                        let number: usize = match caps[1].parse() {
                            Ok(n) => n,
                            Err(_) => {
                                warnings.push(format!(
                                    "placeholder {} has an unparseable number",
                                    &caps[0]
                                ));
                                return caps[0].to_string();
                            },
                        };
                        match number.checked_sub(1).and_then(|i| inventory.get(i)) {
                            Some(file) => {
                                format!("![Image {}]({})", number, image_dir.join(file).display())
                            },
                            None => {
                                log::warn!(
                                    "placeholder {} is out of range (inventory has {} assets)",
                                    number,
                                    inventory.len()
                                );
                                warnings.push(format!(
                                    "unresolved image placeholder {} ({} assets available)",
                                    number,
                                    inventory.len()
                                ));
                                caps[0].to_string()
                            },
                        }
                    });
                section.content = resolved.into_owned();
                section
            })
            .collect();

        ResolutionOutcome { sections, warnings }
    }

    /// Run finalization end to end over files.
    ///
    /// Reads the section log at `sections_path` (missing or empty log is
    /// fatal), resolves against `image_dir`, and writes the resolved
    /// sections as JSONL to `output_path`.
    pub fn run(
        &self,
        sections_path: &Path,
        image_dir: &Path,
        output_path: &Path,
    ) -> Result<ResolutionOutcome> {
        let sections = read_section_log(sections_path)?;
        let inventory = self.build_inventory(image_dir);
        let outcome = self.resolve(sections, image_dir, &inventory);

        let mut writer = BufWriter::new(File::create(output_path)?);
        write_section_log(&mut writer, &outcome.sections)?;
        writer.flush()?;

        log::info!(
            "finalized {} sections, {} unresolved placeholders",
            outcome.sections.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }
}

/// Read a JSONL section log. Missing file or zero records is fatal — there
/// is nothing to finalize.
pub fn read_section_log(path: &Path) -> Result<Vec<Section>> {
    if !path.exists() {
        return Err(Error::InputMissing(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut sections = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sections.push(serde_json::from_str(&line)?);
    }

    if sections.is_empty() {
        return Err(Error::EmptySectionLog(path.display().to_string()));
    }
    Ok(sections)
}

/// Write sections as JSONL, one record per line.
pub fn write_section_log<W: Write>(writer: &mut W, sections: &[Section]) -> Result<()> {
    for section in sections {
        serde_json::to_writer(&mut *writer, section)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Natural (numeric-aware) comparison of two filenames.
///
/// Digit runs compare by numeric value, everything else byte-wise, so
/// `img2.png` sorts before `img10.png`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let na = take_digits(&mut ai);
                    let nb = take_digits(&mut bi);
                    // Compare stripped runs by length first, then lexically,
                    // which matches numeric order without overflow.
                    let sa = na.trim_start_matches('0');
                    let sb = nb.trim_start_matches('0');
                    let cmp = sa
                        .len()
                        .cmp(&sb.len())
                        .then_with(|| sa.cmp(sb))
                        .then_with(|| na.len().cmp(&nb.len()));
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                } else {
                    if ca != cb {
                        return ca.cmp(&cb);
                    }
                    ai.next();
                    bi.next();
                }
            },
        }
    }
}

fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(c) = iter.peek() {
        if c.is_ascii_digit() {
            out.push(*c);
            iter.next();
        } else {
            break;
        }
    }
    out
}
