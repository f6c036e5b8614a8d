//! # gcms-compare - Cross-Sample GC-MS Report Comparison
//!
//! `gcms_compare` turns the exported text reports of a gas chromatography /
//! mass spectrometry instrument into one typed, queryable corpus and prepares
//! it for cross-sample comparison.
//!
//! ## Key Features
//!
//! - **Forgiving report parser**: Locates the peak-list and library-search
//!   sections by their header tokens, tolerates ragged rows, footers and
//!   malformed numbers, and left-joins library identifications onto peaks.
//!
//! - **Canonical compound names**: Library hits such as `"1-Butanol"`,
//!   `(+)-2-Bornanone` or `ETHYL ACETATE` are normalized deterministically so
//!   the same substance lines up across samples.
//!
//! - **Failure isolation**: One unreadable upload never sinks a batch; it is
//!   reported and skipped.
//!
//! - **Comparison data**: Compound × sample heatmap pivots, two-component
//!   PCA of standardized areas, and per-sample chromatogram traces.
//!
//! - **Clean exports**: Flat CSV tables and a ZSTD-compressed Parquet corpus
//!   with provenance in the footer metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcms_compare::prelude::*;
//!
//! let report = "\"Peak\",\"R.T.\",\"Height\",\"Area\"\n\
//!               1,3.41,1200,25000\n\
//!               2,5.12,900,12000\n\
//!               \"PK\",\"RT\",\"Library/ID\",\"CAS\"\n\
//!               1,3.41,\"1-Butanol\",\"000071-36-3\"\n";
//!
//! let uploads = vec![Upload::new("coffee_01.csv", report)];
//! let outcome = analyze_batch(&uploads, &BatchConfig::default())?;
//!
//! let corpus = &outcome.corpus;
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.identified_len(), 1);
//! assert_eq!(corpus.records()[0].compound.as_str(), "Butanol");
//! assert_eq!(corpus.records()[1].record.identifier(), "Unknown");
//! # Ok::<(), gcms_compare::corpus::BatchError>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Raw library identifier → canonical compound name |
//! | [`report`] | One report text → typed, joined sample records |
//! | [`corpus`] | Batch ingestion, corpus assembly, analysis session |
//! | [`analysis`] | Heatmap pivot, PCA, overlay traces |
//! | [`export`] | CSV and Parquet serialization |
//! | [`schema`] | Column names and the Arrow schema of the corpus table |
//!
//! ## Feature Flags
//!
//! - `colorized_output` (default): colored batch reports via `console`.
//! - `parallel`: parse the files of a batch in parallel with `rayon`.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod corpus;
pub mod export;
pub mod normalize;
pub mod report;
pub mod schema;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        compute_pca, overlay_traces, pivot_heatmap, Abundance, AnalysisError, CompoundOrder,
        Heatmap, HeatmapOptions, PcaResult, Trace,
    };
    pub use crate::corpus::{
        analyze_batch, assemble, AnalysisSession, BatchConfig, BatchError, BatchOutcome,
        BatchReport, Corpus, CorpusRecord, CorpusSummary, SkippedFile, Upload, MAX_BATCH_FILES,
    };
    pub use crate::export::{
        write_corpus_csv, write_corpus_parquet, CorpusWriter, CorpusWriterConfig, ExportError,
        RowSelection,
    };
    pub use crate::normalize::{normalize, CompoundName, NameNormalizer, Strictness, UNKNOWN};
    pub use crate::report::{
        parse_report, ParseError, ParserConfig, ReportParser, SampleLabel, SampleRecord,
        SampleRecordSet,
    };
    pub use crate::schema::{columns, create_corpus_schema, CORPUS_FORMAT_VERSION};
}
