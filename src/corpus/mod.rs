//! # Corpus Assembly
//!
//! Concatenates the per-file record sets of one analysis run, derives the
//! canonical `Compound` of every row and exposes the identified subset used
//! by cross-sample comparisons.
//!
//! ## Invariants
//!
//! - One row per surviving peak per sample, in upload order then report
//!   order. Rows are never deduplicated across samples.
//! - The identified subset is a subset of rows: a sample only disappears
//!   from it when none of its peaks normalizes to a compound name.
//! - A library hit that normalizes to `Unknown` is unidentified, like a
//!   peak without any hit.
//! - A [`Corpus`] is immutable once built; share it behind an `Arc`.

mod batch;
mod error;
mod report;
mod session;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use log::info;
use serde::Serialize;

use crate::normalize::{CompoundName, NameNormalizer, Strictness, UNKNOWN};
use crate::report::{SampleRecord, SampleRecordSet};

pub use batch::{analyze_batch, BatchConfig, BatchOutcome, ParsedFile, Upload, MAX_BATCH_FILES};
pub use error::{BatchError, SkippedFile};
pub use report::BatchReport;
pub use session::AnalysisSession;

/// A sample record with its canonical compound name.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusRecord {
    /// The parsed and joined record.
    pub record: SampleRecord,
    /// Canonical name derived from the record's identifier.
    pub compound: CompoundName,
}

impl CorpusRecord {
    /// Sample label of this row.
    pub fn sample(&self) -> &str {
        &self.record.sample
    }

    /// Whether the row belongs to the identified subset.
    pub fn is_identified(&self) -> bool {
        self.compound.is_identified()
    }
}

/// All records of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    records: Vec<CorpusRecord>,
    identified: Vec<usize>,
    samples: Vec<Arc<str>>,
    strictness: Strictness,
}

impl Corpus {
    /// Assemble a corpus, normalizing identifiers with `normalizer`.
    pub fn assemble(sets: Vec<SampleRecordSet>, normalizer: &NameNormalizer) -> Self {
        let mut samples: Vec<Arc<str>> = Vec::with_capacity(sets.len());
        let mut records = Vec::with_capacity(sets.iter().map(SampleRecordSet::len).sum());
        let mut cache: HashMap<String, CompoundName> = HashMap::new();

        for set in sets {
            if !samples.iter().any(|s| *s == set.sample) {
                samples.push(Arc::clone(&set.sample));
            }
            for record in set.records {
                let compound = match record.raw_identifier() {
                    Some(raw) => cache
                        .entry(raw.to_string())
                        .or_insert_with(|| comparable(normalizer.normalize(raw)))
                        .clone(),
                    None => CompoundName::Unidentified,
                };
                records.push(CorpusRecord { record, compound });
            }
        }

        let identified = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_identified())
            .map(|(index, _)| index)
            .collect();

        let corpus = Self {
            records,
            identified,
            samples,
            strictness: normalizer.strictness(),
        };
        info!("{}", corpus.summary());
        corpus
    }

    /// Every row, identified or not.
    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    /// Rows whose compound was identified.
    pub fn identified(&self) -> impl Iterator<Item = &CorpusRecord> + '_ {
        self.identified.iter().map(move |&index| &self.records[index])
    }

    /// Number of identified rows.
    pub fn identified_len(&self) -> usize {
        self.identified.len()
    }

    /// Sample labels in upload order.
    pub fn samples(&self) -> &[Arc<str>] {
        &self.samples
    }

    /// Rows of one sample, in report order.
    pub fn sample_records<'a>(&'a self, sample: &'a str) -> impl Iterator<Item = &'a CorpusRecord> + 'a {
        self.records.iter().filter(move |r| r.sample() == sample)
    }

    /// Distinct canonical compound names, sorted.
    pub fn compounds(&self) -> BTreeSet<&str> {
        self.identified()
            .filter_map(|r| r.compound.as_canonical())
            .collect()
    }

    /// Strictness used to derive compound names.
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Headline counts for this corpus.
    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            samples: self.samples.len(),
            total_peaks: self.records.len(),
            identified_peaks: self.identified.len(),
            unique_compounds: self.compounds().len(),
        }
    }
}

/// A library hit literally named `Unknown` identifies nothing.
fn comparable(name: CompoundName) -> CompoundName {
    match name {
        CompoundName::Canonical(ref text) if text.eq_ignore_ascii_case(UNKNOWN) => {
            CompoundName::Unidentified
        }
        name => name,
    }
}

/// Assemble a corpus with the default normalizer.
pub fn assemble(sets: Vec<SampleRecordSet>) -> Corpus {
    Corpus::assemble(sets, &NameNormalizer::default())
}

/// Headline counts of a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    /// Number of samples.
    pub samples: usize,
    /// Rows in the full corpus.
    pub total_peaks: usize,
    /// Rows in the identified subset.
    pub identified_peaks: usize,
    /// Distinct canonical compound names.
    pub unique_compounds: usize,
}

impl fmt::Display for CorpusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {} compounds, {} identified of {} peaks",
            self.samples, self.unique_compounds, self.identified_peaks, self.total_peaks
        )
    }
}
