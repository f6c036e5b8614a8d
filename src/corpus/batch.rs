use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{BatchError, Corpus, SkippedFile};
use crate::normalize::{NameNormalizer, Strictness};
use crate::report::{ParseError, ParseStats, ParserConfig, ReportParser, SampleRecordSet};

/// Maximum number of reports compared in one analysis.
pub const MAX_BATCH_FILES: usize = 20;

/// One uploaded report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name as uploaded, the source of the sample label.
    pub name: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl Upload {
    /// Create an upload from a name and its bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read an upload from disk, named after the file name component.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, content })
    }

    /// Decoded text; invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Configuration of one analysis batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Report parser settings.
    pub parser: ParserConfig,
    /// Compound-name normalization policy.
    pub strictness: Strictness,
    /// Upload limit; values above [`MAX_BATCH_FILES`] are capped.
    pub max_files: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            strictness: Strictness::default(),
            max_files: MAX_BATCH_FILES,
        }
    }
}

impl BatchConfig {
    /// Effective upload limit.
    pub fn file_limit(&self) -> usize {
        self.max_files.clamp(1, MAX_BATCH_FILES)
    }
}

/// An uploaded file that made it into the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// Name of the uploaded file.
    pub name: String,
    /// Sample label its records carry.
    pub sample: Arc<str>,
    /// Surviving peaks.
    pub peaks: usize,
    /// Parsing counters.
    pub stats: ParseStats,
}

/// Result of a successful batch: the corpus and how each file fared.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Assembled corpus.
    pub corpus: Corpus,
    /// Files that parsed, in upload order.
    pub parsed: Vec<ParsedFile>,
    /// Files that failed to parse, in upload order.
    pub skipped: Vec<SkippedFile>,
}

fn parse_upload(parser: &ReportParser, upload: &Upload) -> Result<SampleRecordSet, ParseError> {
    parser.parse(&upload.name, &upload.text())
}

/// Parse every upload and assemble the surviving record sets.
///
/// Per-file failures are collected in [`BatchOutcome::skipped`]; the batch
/// only fails when nothing was uploaded, too much was uploaded, or no file
/// parsed at all.
pub fn analyze_batch(uploads: &[Upload], config: &BatchConfig) -> Result<BatchOutcome, BatchError> {
    if uploads.is_empty() {
        return Err(BatchError::NoFiles);
    }
    let limit = config.file_limit();
    if uploads.len() > limit {
        return Err(BatchError::TooManyFiles {
            count: uploads.len(),
            limit,
        });
    }

    let parser = ReportParser::new(config.parser.clone());

    #[cfg(feature = "parallel")]
    let results: Vec<_> = uploads
        .par_iter()
        .map(|upload| parse_upload(&parser, upload))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = uploads
        .iter()
        .map(|upload| parse_upload(&parser, upload))
        .collect();

    let mut sets = Vec::with_capacity(uploads.len());
    let mut skipped = Vec::new();
    for (upload, result) in uploads.iter().zip(results) {
        match result {
            Ok(set) => {
                if sets.iter().any(|s: &SampleRecordSet| s.sample == set.sample) {
                    warn!(
                        "{}: sample label '{}' is shared with an earlier file",
                        upload.name, set.sample
                    );
                }
                sets.push(set);
            }
            Err(reason) => {
                warn!("skipping {}: {}", upload.name, reason);
                skipped.push(SkippedFile {
                    name: upload.name.clone(),
                    reason,
                });
            }
        }
    }

    if sets.is_empty() {
        return Err(BatchError::EmptyBatch { skipped });
    }

    info!(
        "parsed {} of {} uploaded reports",
        sets.len(),
        uploads.len()
    );

    let parsed = sets
        .iter()
        .map(|set| ParsedFile {
            name: set.source_name.clone(),
            sample: Arc::clone(&set.sample),
            peaks: set.len(),
            stats: set.stats.clone(),
        })
        .collect();

    let corpus = Corpus::assemble(sets, &NameNormalizer::new(config.strictness));
    Ok(BatchOutcome {
        corpus,
        parsed,
        skipped,
    })
}
