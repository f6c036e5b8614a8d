use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;

use super::{analyze_batch, BatchConfig, BatchError, BatchReport, Corpus, SkippedFile, Upload};

/// Holds the staged uploads and the last analyzed corpus of one user session.
///
/// Staging new files never touches the current corpus; only
/// [`AnalysisSession::analyze`] replaces it, and [`AnalysisSession::clear`]
/// drops everything.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    config: BatchConfig,
    staged: Vec<Upload>,
    corpus: Option<Arc<Corpus>>,
    report: Option<BatchReport>,
    analyzed_at: Option<DateTime<Utc>>,
}

impl AnalysisSession {
    /// Create an empty session.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Batch configuration of this session.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Replace the staged uploads.
    pub fn stage(&mut self, uploads: Vec<Upload>) {
        debug!("staged {} uploads", uploads.len());
        self.staged = uploads;
    }

    /// Uploads waiting for the next analysis.
    pub fn staged(&self) -> &[Upload] {
        &self.staged
    }

    /// Analyze the staged uploads and store the resulting corpus.
    ///
    /// On failure the previous corpus is discarded and the session reports
    /// no analysis.
    pub fn analyze(&mut self) -> Result<Arc<Corpus>, BatchError> {
        match analyze_batch(&self.staged, &self.config) {
            Ok(outcome) => {
                self.report = Some(BatchReport::from_outcome(&outcome));
                let corpus = Arc::new(outcome.corpus);
                self.corpus = Some(Arc::clone(&corpus));
                self.analyzed_at = Some(Utc::now());
                Ok(corpus)
            }
            Err(err) => {
                self.corpus = None;
                self.report = None;
                self.analyzed_at = None;
                Err(err)
            }
        }
    }

    /// Drop staged uploads and the current corpus.
    pub fn clear(&mut self) {
        self.staged.clear();
        self.corpus = None;
        self.report = None;
        self.analyzed_at = None;
    }

    /// The last analyzed corpus.
    pub fn corpus(&self) -> Option<Arc<Corpus>> {
        self.corpus.clone()
    }

    /// Whether a corpus is available.
    pub fn is_analyzed(&self) -> bool {
        self.corpus.is_some()
    }

    /// Files skipped by the last analysis.
    pub fn skipped(&self) -> &[SkippedFile] {
        self.report
            .as_ref()
            .map(|r| r.skipped.as_slice())
            .unwrap_or_default()
    }

    /// Per-file report of the last analysis.
    pub fn report(&self) -> Option<&BatchReport> {
        self.report.as_ref()
    }

    /// When the current corpus was built.
    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.analyzed_at
    }
}
