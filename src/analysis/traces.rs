use std::sync::Arc;

use super::Abundance;
use crate::corpus::Corpus;

/// Chromatogram trace of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Sample label.
    pub sample: Arc<str>,
    /// Quantity on the y axis.
    pub abundance: Abundance,
    /// (retention time, value) pairs sorted by retention time.
    pub points: Vec<(f64, f64)>,
}

impl Trace {
    /// Largest value of the trace, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|(_, v)| *v).reduce(f64::max)
    }
}

/// One trace per sample over every detected peak, identified or not.
///
/// Peaks without the chosen value are omitted.
pub fn overlay_traces(corpus: &Corpus, abundance: Abundance) -> Vec<Trace> {
    corpus
        .samples()
        .iter()
        .map(|sample| {
            let mut points: Vec<(f64, f64)> = corpus
                .sample_records(sample)
                .filter_map(|row| {
                    let peak = &row.record.peak;
                    abundance.of(peak).map(|value| (peak.retention_time, value))
                })
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Trace {
                sample: Arc::clone(sample),
                abundance,
                points,
            }
        })
        .collect()
}
