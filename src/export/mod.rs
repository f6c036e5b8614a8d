//! # Table Export
//!
//! Serializes the corpus and prepared comparison data.
//!
//! - Flat CSV: the corpus (all rows or the identified subset), heatmap
//!   pivots, overlay traces and PCA scores.
//! - Parquet: the corpus table through Arrow with ZSTD compression and
//!   footer metadata recording the format version, creation time, sample
//!   order, skipped files and normalizer policy.
//!
//! An unidentified `Compound` is the text `Unknown` in CSV, where every
//! cell is text, and a null in Parquet. The `Identifier` column reads
//! `Unknown` in both when a peak had no library match.
//!
//! ```no_run
//! use gcms_compare::corpus::{analyze_batch, BatchConfig, Upload};
//! use gcms_compare::export::{write_corpus_csv, write_corpus_parquet, RowSelection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let uploads = vec![Upload::from_path("coffee_01.csv")?];
//! let outcome = analyze_batch(&uploads, &BatchConfig::default())?;
//!
//! write_corpus_csv(&outcome.corpus, RowSelection::All, std::fs::File::create("corpus.csv")?)?;
//! write_corpus_parquet("corpus.parquet", &outcome)?;
//! # Ok(())
//! # }
//! ```

mod columnar;
mod error;
mod flat;

pub use columnar::{
    write_corpus_parquet, CorpusMetadata, CorpusWriter, CorpusWriterConfig, CorpusWriterStats,
};
pub use error::ExportError;
pub use flat::{
    corpus_csv_headers, write_corpus_csv, write_heatmap_csv, write_pca_csv, write_traces_csv,
    RowSelection,
};
