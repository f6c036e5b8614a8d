//! # Corpus Table Schema
//!
//! Column names shared by the report parser, the flat CSV export and the
//! Arrow/Parquet export.
//!
//! ## Corpus Columns
//!
//! | Column | Arrow Type | Description |
//! |--------|------------|-------------|
//! | Sample | Utf8 | Sample label (file name, with or without extension) |
//! | Peak | UInt32 | Peak index, unique within a sample |
//! | RetentionTime | Float64 | Retention time in minutes |
//! | Height | Float64 (nullable) | Peak height |
//! | Area | Float64 (nullable) | Peak area |
//! | Compound | Utf8 (nullable) | Canonical compound name, null when unidentified |
//! | Identifier | Utf8 | Raw library identifier or `Unknown` |
//! | LibraryRetentionTime | Float64 (nullable) | RT reported by the library section |
//! | PeakFields | Utf8 | JSON object of passthrough peak-list columns |
//! | LibraryFields | Utf8 (nullable) | JSON object of passthrough library columns |

mod builders;
/// Corpus table column name constants.
pub mod columns;
mod constants;
/// Report header tokens.
pub mod report_headers;


pub use builders::{create_corpus_schema, create_corpus_schema_arc};
pub use constants::*;
