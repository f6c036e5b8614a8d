use std::sync::Arc;

use serde::Serialize;

use crate::normalize::UNKNOWN;

/// Passthrough columns kept verbatim, in source column order.
pub type Passthrough = Vec<(String, String)>;

fn lookup<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// One detected chromatographic peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRecord {
    /// Peak index, the join key to library matches.
    pub peak: u32,
    /// Retention time in minutes.
    pub retention_time: f64,
    /// Peak height, if reported and numeric.
    pub height: Option<f64>,
    /// Peak area, if reported and numeric.
    pub area: Option<f64>,
    /// Percentage columns (e.g. `% of total`) in source order.
    pub percentages: Vec<(String, Option<f64>)>,
    /// Remaining peak-list columns, verbatim.
    pub attributes: Passthrough,
}

impl PeakRecord {
    /// Value of a percentage column by header name.
    pub fn percentage(&self, name: &str) -> Option<f64> {
        self.percentages
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| *value)
    }

    /// Value of a passthrough column by header name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }
}

/// Best library match for one peak.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryMatch {
    /// Peak index the search was run against.
    pub peak_key: u32,
    /// Retention time reported by the library section.
    pub retention_time: Option<f64>,
    /// Matched library name; `None` when the cell was blank.
    pub identifier: Option<String>,
    /// Remaining library columns (CAS, quality, reference...), verbatim.
    pub attributes: Passthrough,
}

impl LibraryMatch {
    /// Value of a passthrough column by header name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }
}

/// A peak joined with its library match and tagged with its sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Sample label shared by every record of one report.
    pub sample: Arc<str>,
    /// The detected peak.
    pub peak: PeakRecord,
    /// Library match, absent when the peak was not searched or not matched.
    pub library: Option<LibraryMatch>,
}

impl SampleRecord {
    /// Raw library identifier, `None` for unmatched peaks.
    pub fn raw_identifier(&self) -> Option<&str> {
        self.library.as_ref()?.identifier.as_deref()
    }

    /// Library identifier, or [`UNKNOWN`] for unmatched peaks.
    pub fn identifier(&self) -> &str {
        self.raw_identifier().unwrap_or(UNKNOWN)
    }
}

/// Per-file parsing counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines in the input text.
    pub lines: usize,
    /// Integer-led rows found in the peak-list section.
    pub peak_rows: usize,
    /// Integer-led rows found in the library section.
    pub library_rows: usize,
    /// Non-blank lines skipped as non-data (footers, noise).
    pub skipped_lines: usize,
    /// Peak rows dropped for a missing or malformed index or retention time.
    pub dropped_peaks: usize,
    /// Library rows dropped for a missing or malformed peak key.
    pub dropped_library_rows: usize,
    /// Numeric cells that held uncoercible text and were read as missing.
    pub malformed_cells: usize,
    /// Library rows ignored because an earlier row had the same peak key.
    pub duplicate_library_keys: usize,
    /// Peaks with no library match.
    pub unmatched_peaks: usize,
}

/// All records parsed from one report.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecordSet {
    /// Sample label.
    pub sample: Arc<str>,
    /// Name of the uploaded file.
    pub source_name: String,
    /// One record per surviving peak, in report order.
    pub records: Vec<SampleRecord>,
    /// Parsing counters.
    pub stats: ParseStats,
}

impl SampleRecordSet {
    /// Number of surviving peaks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no peaks survived.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the report carried a library search section with matches.
    pub fn has_library_matches(&self) -> bool {
        self.records.iter().any(|r| r.library.is_some())
    }
}
