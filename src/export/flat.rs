//! Flat CSV tables.

use std::collections::HashSet;
use std::io::Write;

use log::debug;

use super::ExportError;
use crate::analysis::{Heatmap, PcaResult, Trace};
use crate::corpus::{Corpus, CorpusRecord};
use crate::schema::columns;

/// Which corpus rows an export includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowSelection {
    /// Every surviving peak (default).
    #[default]
    All,
    /// Only rows with a canonical compound name.
    Identified,
}

impl RowSelection {
    fn rows<'a>(&self, corpus: &'a Corpus) -> Box<dyn Iterator<Item = &'a CorpusRecord> + 'a> {
        match self {
            RowSelection::All => Box::new(corpus.records().iter()),
            RowSelection::Identified => Box::new(corpus.identified()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Source {
    Peak(String),
    Library(String),
}

/// Passthrough columns in first-seen order, with their output headers.
struct PassthroughColumns {
    sources: Vec<Source>,
    headers: Vec<String>,
}

impl PassthroughColumns {
    fn collect<'a, I>(rows: I) -> Self
    where
        I: Iterator<Item = &'a CorpusRecord>,
    {
        let mut sources = Vec::new();
        let mut seen = HashSet::new();
        for row in rows {
            let peak = &row.record.peak;
            let peak_names = peak
                .percentages
                .iter()
                .map(|(name, _)| name)
                .chain(peak.attributes.iter().map(|(name, _)| name))
                .map(|name| Source::Peak(name.clone()));
            let library_names = row
                .record
                .library
                .iter()
                .flat_map(|m| m.attributes.iter())
                .map(|(name, _)| Source::Library(name.clone()));
            for source in peak_names.chain(library_names) {
                if seen.insert(source.clone()) {
                    sources.push(source);
                }
            }
        }

        let core: HashSet<&str> = columns::CORE_COLUMNS.iter().copied().collect();
        let peak_names: HashSet<&str> = sources
            .iter()
            .filter_map(|s| match s {
                Source::Peak(name) => Some(name.as_str()),
                Source::Library(_) => None,
            })
            .collect();

        let headers = sources
            .iter()
            .map(|source| match source {
                Source::Peak(name) if core.contains(name.as_str()) => {
                    format!("{}{}", columns::PEAK_PREFIX, name)
                }
                Source::Peak(name) => name.clone(),
                Source::Library(name)
                    if core.contains(name.as_str()) || peak_names.contains(name.as_str()) =>
                {
                    format!("{}{}", columns::LIBRARY_PREFIX, name)
                }
                Source::Library(name) => name.clone(),
            })
            .collect();

        Self { sources, headers }
    }

    fn cell(source: &Source, row: &CorpusRecord) -> String {
        match source {
            Source::Peak(name) => {
                let peak = &row.record.peak;
                match peak.percentages.iter().find(|(key, _)| key == name) {
                    Some((_, value)) => format_optional(*value),
                    None => peak.attribute(name).unwrap_or_default().to_string(),
                }
            }
            Source::Library(name) => row
                .record
                .library
                .as_ref()
                .and_then(|m| m.attribute(name))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Header of a corpus CSV export.
pub fn corpus_csv_headers(corpus: &Corpus, selection: RowSelection) -> Vec<String> {
    let passthrough = PassthroughColumns::collect(selection.rows(corpus));
    columns::CORE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(passthrough.headers)
        .collect()
}

/// Write the corpus as a flat CSV table; returns the number of data rows.
///
/// Core columns come first, then passthrough columns in first-seen order.
/// Peak-list columns named like a core column are prefixed with `Peak:`;
/// library columns whose name collides with a peak-list or core column are
/// prefixed with `Library:`. Missing values are empty cells and an
/// unidentified `Compound` is written as `Unknown`.
pub fn write_corpus_csv<W: Write>(
    corpus: &Corpus,
    selection: RowSelection,
    writer: W,
) -> Result<usize, ExportError> {
    let passthrough = PassthroughColumns::collect(selection.rows(corpus));
    let mut out = ::csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = columns::CORE_COLUMNS.to_vec();
    header.extend(passthrough.headers.iter().map(String::as_str));
    out.write_record(&header)?;

    let mut written = 0;
    for row in selection.rows(corpus) {
        let peak = &row.record.peak;
        let mut record = vec![
            row.sample().to_string(),
            peak.peak.to_string(),
            peak.retention_time.to_string(),
            format_optional(peak.height),
            format_optional(peak.area),
            row.compound.as_str().to_string(),
            row.record.identifier().to_string(),
        ];
        record.extend(
            passthrough
                .sources
                .iter()
                .map(|source| PassthroughColumns::cell(source, row)),
        );
        out.write_record(&record)?;
        written += 1;
    }
    out.flush()?;

    debug!(
        "wrote {} corpus rows with {} passthrough columns",
        written,
        passthrough.headers.len()
    );
    Ok(written)
}

/// Write a heatmap pivot: a `Compound` column then one column per sample.
///
/// Cells hold raw sums; the log transform is a display concern.
pub fn write_heatmap_csv<W: Write>(heatmap: &Heatmap, writer: W) -> Result<usize, ExportError> {
    let mut out = ::csv::Writer::from_writer(writer);

    let mut header = vec![columns::COMPOUND.to_string()];
    header.extend(heatmap.samples().iter().map(|s| s.to_string()));
    out.write_record(&header)?;

    for (compound, values) in heatmap.rows() {
        let mut record = vec![compound.to_string()];
        record.extend(values.iter().map(f64::to_string));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(heatmap.len())
}

/// Write overlay traces in long form: sample, retention time, value.
pub fn write_traces_csv<W: Write>(traces: &[Trace], writer: W) -> Result<usize, ExportError> {
    let mut out = ::csv::Writer::from_writer(writer);
    let value_column = traces
        .first()
        .map(|t| t.abundance.as_str())
        .unwrap_or(columns::HEIGHT);
    out.write_record([columns::SAMPLE, columns::RETENTION_TIME, value_column])?;

    let mut written = 0;
    for trace in traces {
        for (rt, value) in &trace.points {
            out.write_record([trace.sample.to_string(), rt.to_string(), value.to_string()])?;
            written += 1;
        }
    }
    out.flush()?;
    Ok(written)
}

/// Write PCA scores: sample, PC1, PC2.
pub fn write_pca_csv<W: Write>(pca: &PcaResult, writer: W) -> Result<usize, ExportError> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record([columns::SAMPLE, "PC1", "PC2"])?;
    for (sample, pc1, pc2) in pca.points() {
        out.write_record([sample.to_string(), pc1.to_string(), pc2.to_string()])?;
    }
    out.flush()?;
    Ok(pca.samples.len())
}
