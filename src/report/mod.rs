//! # Report Parsing
//!
//! Turns the text of one instrument report into typed, joined records.
//!
//! Reports are quoted, comma-separated text with a peak list and an
//! optional library search section:
//!
//! ```text
//! "Peak","R.T.","First scan","Max scan","Last scan","PK TY","Height","Area","% of total"
//! 1,3.412,310,316,330,"BV",125432,2543221,4.21
//! 2,5.120,612,620,641,"VV",98211,1203311,1.99
//!
//! "PK","RT","Area Pct","Library/ID","Ref","CAS","Qual"
//! 1,3.412,4.21,"Ethyl Acetate",1234,"000141-78-6",91
//! ,,,"Acetic acid, ethyl ester",5678,"000141-78-6",80
//! ```
//!
//! The library section is left-joined onto the peak list by peak index.
//! Every surviving peak appears exactly once; peaks without a match carry
//! no [`LibraryMatch`] and report their identifier as `Unknown`. When the
//! library lists several rows for one peak, the first (best) row wins.
//!
//! Failures are per file ([`ParseError`]); malformed rows and cells are
//! dropped or read as missing and counted in [`ParseStats`].

mod coerce;
mod error;
mod fields;
mod parser;
mod records;
mod sections;

#[cfg(test)]
mod tests;

pub use coerce::{coerce_float, coerce_index, Coerced};
pub use error::ParseError;
pub use parser::{parse_report, ParserConfig, ReportParser, SampleLabel};
pub use records::{
    LibraryMatch, ParseStats, Passthrough, PeakRecord, SampleRecord, SampleRecordSet,
};
