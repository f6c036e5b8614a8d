//! Single-pass section scanner and ragged table builder.
//!
//! A report holds a peak list and, optionally, a library search section
//! after it:
//!
//! ```text
//! SeekingPeakHeader ──"Peak","R.T."──▶ InPeakData ──"PK","RT"──▶ InLibraryData
//!        │                                  │                          │
//!        └────────── end of input ──────────┴──────────────────────────┴──▶ Done
//! ```
//!
//! Lines whose first field is not a plain integer are skipped in every
//! data state (blank separators, footers, repeated headers).

use log::debug;

use super::fields::{is_data_row, split_fields, HeaderKind};

/// Header and data rows of one report section.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawSection {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub skipped_lines: usize,
}

impl RawSection {
    fn new(header: Vec<String>) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    fn accept(&mut self, fields: Vec<String>, line_no: usize) {
        if is_data_row(&fields) {
            self.rows.push(fields);
        } else if !(fields.len() == 1 && fields[0].is_empty()) {
            debug!("skipping non-data line {}", line_no + 1);
            self.skipped_lines += 1;
        }
    }
}

/// Both sections of a report after scanning.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportSections {
    pub peaks: RawSection,
    pub library: Option<RawSection>,
    pub line_count: usize,
}

#[derive(Debug)]
enum ScanState {
    SeekingPeakHeader,
    InPeakData(RawSection),
    InLibraryData(RawSection, RawSection),
}

/// Scan report text once, returning `None` when no peak-list header exists.
pub(crate) fn scan_sections(text: &str) -> Option<ReportSections> {
    let mut state = ScanState::SeekingPeakHeader;
    let mut line_count = 0;

    for (line_no, line) in text.lines().map(str::trim).enumerate() {
        line_count += 1;
        let fields = split_fields(line);
        let header = HeaderKind::detect(&fields);

        state = match (state, header) {
            (ScanState::SeekingPeakHeader, Some(HeaderKind::PeakList)) => {
                ScanState::InPeakData(RawSection::new(fields))
            }
            (ScanState::SeekingPeakHeader, Some(HeaderKind::LibrarySearch)) => {
                debug!(
                    "ignoring library search header before peak list (line {})",
                    line_no + 1
                );
                ScanState::SeekingPeakHeader
            }
            (ScanState::SeekingPeakHeader, None) => ScanState::SeekingPeakHeader,
            (ScanState::InPeakData(peaks), Some(HeaderKind::LibrarySearch)) => {
                ScanState::InLibraryData(peaks, RawSection::new(fields))
            }
            (ScanState::InPeakData(mut peaks), _) => {
                peaks.accept(fields, line_no);
                ScanState::InPeakData(peaks)
            }
            (ScanState::InLibraryData(peaks, mut library), _) => {
                library.accept(fields, line_no);
                ScanState::InLibraryData(peaks, library)
            }
        };
    }

    match state {
        ScanState::SeekingPeakHeader => None,
        ScanState::InPeakData(peaks) => Some(ReportSections {
            peaks,
            library: None,
            line_count,
        }),
        ScanState::InLibraryData(peaks, library) => Some(ReportSections {
            peaks,
            library: Some(library),
            line_count,
        }),
    }
}

/// A section's rows aligned to a common column count.
///
/// The width is the smaller of the header length and the widest data row;
/// longer rows are truncated and shorter rows read as missing cells.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub(crate) fn from_section(section: &RawSection) -> Self {
        let widest = section.rows.iter().map(Vec::len).max().unwrap_or(0);
        let width = widest.min(section.header.len());

        let columns = section.header[..width].to_vec();
        let rows = section
            .rows
            .iter()
            .map(|row| row.iter().take(width).cloned().collect())
            .collect();

        Self { columns, rows }
    }

    /// Index of the first column whose name is in `names`.
    pub(crate) fn find_column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.columns.iter().position(|c| c == name))
    }

    /// Non-blank cell text, `None` when absent or blank.
    pub(crate) fn cell<'a>(&self, row: &'a [String], column: usize) -> Option<&'a str> {
        row.get(column)
            .map(String::as_str)
            .filter(|cell| !cell.trim().is_empty())
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}
