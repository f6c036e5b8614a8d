use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::coerce::{coerce_float, coerce_index, Coerced};
use super::records::{LibraryMatch, ParseStats, PeakRecord, SampleRecord, SampleRecordSet};
use super::sections::{scan_sections, RawTable};
use super::ParseError;
use crate::schema::report_headers;

/// How the sample label is derived from an uploaded file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleLabel {
    /// File name without its last extension (`run_01.csv` → `run_01`).
    #[default]
    FileStem,
    /// File name as uploaded.
    FileName,
}

impl SampleLabel {
    /// Derive the label for `file_name`.
    pub fn label(&self, file_name: &str) -> String {
        match self {
            SampleLabel::FileName => file_name.to_string(),
            SampleLabel::FileStem => Path::new(file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| !stem.is_empty())
                .unwrap_or_else(|| file_name.to_string()),
        }
    }
}

/// Configuration for the report parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Sample label policy; keep it fixed within one deployment.
    pub sample_label: SampleLabel,
}

/// Parser for peak-list / library-search reports.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    /// Create a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one report into a sample record set.
    pub fn parse(&self, file_name: &str, text: &str) -> Result<SampleRecordSet, ParseError> {
        let sections = scan_sections(text).ok_or(ParseError::MissingPeakSection)?;
        let sample: Arc<str> = Arc::from(self.config.sample_label.label(file_name));

        let mut stats = ParseStats {
            lines: sections.line_count,
            peak_rows: sections.peaks.rows.len(),
            skipped_lines: sections.peaks.skipped_lines,
            ..Default::default()
        };

        let peak_table = RawTable::from_section(&sections.peaks);
        let peaks = extract_peaks(&peak_table, &mut stats);
        if peaks.is_empty() {
            return Err(ParseError::EmptyPeakData);
        }

        let matches = match &sections.library {
            Some(section) => {
                stats.library_rows = section.rows.len();
                stats.skipped_lines += section.skipped_lines;
                extract_library(&RawTable::from_section(section), file_name, &mut stats)
            }
            None => HashMap::new(),
        };

        let records: Vec<SampleRecord> = peaks
            .into_iter()
            .map(|peak| {
                let library = matches.get(&peak.peak).cloned();
                if library.is_none() {
                    stats.unmatched_peaks += 1;
                }
                SampleRecord {
                    sample: Arc::clone(&sample),
                    peak,
                    library,
                }
            })
            .collect();

        debug!(
            "{}: {} peaks, {} unmatched, {} dropped",
            file_name,
            records.len(),
            stats.unmatched_peaks,
            stats.dropped_peaks
        );

        Ok(SampleRecordSet {
            sample,
            source_name: file_name.to_string(),
            records,
            stats,
        })
    }
}

/// Parse one report with the default configuration.
pub fn parse_report(file_name: &str, text: &str) -> Result<SampleRecordSet, ParseError> {
    ReportParser::default().parse(file_name, text)
}

fn tally<T>(value: Coerced<T>, stats: &mut ParseStats) -> Option<T> {
    if value.is_malformed() {
        stats.malformed_cells += 1;
    }
    value.ok()
}

fn extract_peaks(table: &RawTable, stats: &mut ParseStats) -> Vec<PeakRecord> {
    let peak_col = table.find_column(&report_headers::PEAK_KEY_COLUMNS);
    let rt_col = table.find_column(&report_headers::RETENTION_TIME_COLUMNS);
    let height_col = table.find_column(&[report_headers::HEIGHT]);
    let area_col = table.find_column(&[report_headers::AREA]);

    let (Some(peak_col), Some(rt_col)) = (peak_col, rt_col) else {
        stats.dropped_peaks += table.len();
        return Vec::new();
    };

    let mut peaks = Vec::with_capacity(table.len());
    for row in &table.rows {
        let peak = tally(coerce_index(table.cell(row, peak_col)), stats);
        let retention_time = tally(coerce_float(table.cell(row, rt_col)), stats);
        let (Some(peak), Some(retention_time)) = (peak, retention_time) else {
            stats.dropped_peaks += 1;
            continue;
        };

        let mut record = PeakRecord {
            peak,
            retention_time,
            height: height_col.and_then(|c| tally(coerce_float(table.cell(row, c)), stats)),
            area: area_col.and_then(|c| tally(coerce_float(table.cell(row, c)), stats)),
            percentages: Vec::new(),
            attributes: Vec::new(),
        };

        for (index, name) in table.columns.iter().enumerate() {
            if [Some(peak_col), Some(rt_col), height_col, area_col].contains(&Some(index)) {
                continue;
            }
            if report_headers::is_percentage_column(name) {
                let value = tally(coerce_float(table.cell(row, index)), stats);
                record.percentages.push((name.clone(), value));
            } else if let Some(value) = table.cell(row, index) {
                record.attributes.push((name.clone(), value.to_string()));
            }
        }

        peaks.push(record);
    }
    peaks
}

fn extract_library(
    table: &RawTable,
    file_name: &str,
    stats: &mut ParseStats,
) -> HashMap<u32, LibraryMatch> {
    let mut matches = HashMap::new();

    let Some(key_col) = table.find_column(&report_headers::PEAK_KEY_COLUMNS) else {
        return matches;
    };
    let rt_col = table.find_column(&report_headers::RETENTION_TIME_COLUMNS);
    let id_col = table.find_column(&report_headers::IDENTIFIER_COLUMNS);

    for row in &table.rows {
        let Some(peak_key) = tally(coerce_index(table.cell(row, key_col)), stats) else {
            stats.dropped_library_rows += 1;
            continue;
        };
        if matches.contains_key(&peak_key) {
            stats.duplicate_library_keys += 1;
            continue;
        }

        let attributes = table
            .columns
            .iter()
            .enumerate()
            .filter(|(index, _)| ![Some(key_col), rt_col, id_col].contains(&Some(*index)))
            .filter_map(|(index, name)| {
                table
                    .cell(row, index)
                    .map(|value| (name.clone(), value.to_string()))
            })
            .collect();

        matches.insert(
            peak_key,
            LibraryMatch {
                peak_key,
                retention_time: rt_col.and_then(|c| tally(coerce_float(table.cell(row, c)), stats)),
                identifier: id_col
                    .and_then(|c| table.cell(row, c))
                    .map(|id| id.trim().to_string()),
                attributes,
            },
        );
    }

    if stats.duplicate_library_keys > 0 {
        warn!(
            "{}: {} library rows share a peak key with an earlier row; kept the first match",
            file_name, stats.duplicate_library_keys
        );
    }
    matches
}
