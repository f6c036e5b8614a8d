//! # Comparison Data
//!
//! Prepares corpus data for the comparison views. Nothing here renders;
//! every function returns plain tables a plotting or export layer consumes.
//!
//! | View                | Input             | Function          |
//! |---------------------|-------------------|-------------------|
//! | Compound heatmap    | identified subset | [`pivot_heatmap`] |
//! | Sample clustering   | identified subset | [`compute_pca`]   |
//! | Chromatogram overlay| full corpus       | [`overlay_traces`]|
//!
//! Only the identified subset takes part in cross-sample comparisons; the
//! overlay shows every detected peak.

mod error;
mod heatmap;
mod pca;
mod traces;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, CorpusRecord};
use crate::report::PeakRecord;

pub use error::AnalysisError;
pub use heatmap::{
    is_contaminant, pivot_heatmap, CompoundOrder, Heatmap, HeatmapOptions, SILOXANE_KEYWORDS,
};
pub use pca::{compute_pca, PcaResult, MIN_PCA_COMPOUNDS, MIN_PCA_SAMPLES};
pub use traces::{overlay_traces, Trace};

/// Peak quantity used as abundance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Abundance {
    /// Integrated peak area (default).
    #[default]
    Area,
    /// Peak apex height.
    Height,
}

impl Abundance {
    /// Value of this quantity for `peak`, if reported.
    pub fn of(&self, peak: &PeakRecord) -> Option<f64> {
        match self {
            Abundance::Area => peak.area,
            Abundance::Height => peak.height,
        }
    }

    /// Column name of this quantity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Abundance::Area => "Area",
            Abundance::Height => "Height",
        }
    }
}

impl fmt::Display for Abundance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Abundance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "area" => Ok(Abundance::Area),
            "height" => Ok(Abundance::Height),
            _ => Err(format!("Unknown abundance '{}'. Valid options: area, height", s)),
        }
    }
}

/// Compound × sample sums over a set of identified rows.
///
/// Samples keep corpus order and only those with at least one row appear.
/// Compounds are sorted by name. Missing cells are 0.
pub(crate) struct SamplePivot {
    pub samples: Vec<Arc<str>>,
    pub compounds: BTreeMap<String, Vec<f64>>,
}

impl SamplePivot {
    pub fn build<'a, I>(corpus: &Corpus, rows: I, abundance: Abundance) -> Self
    where
        I: IntoIterator<Item = &'a CorpusRecord>,
    {
        let rows: Vec<&CorpusRecord> = rows.into_iter().collect();
        let samples: Vec<Arc<str>> = corpus
            .samples()
            .iter()
            .filter(|s| rows.iter().any(|r| r.sample() == &***s))
            .cloned()
            .collect();

        let mut compounds: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for row in rows {
            let (Some(name), Some(column)) = (
                row.compound.as_canonical(),
                samples.iter().position(|s| &**s == row.sample()),
            ) else {
                continue;
            };
            let cells = compounds
                .entry(name.to_string())
                .or_insert_with(|| vec![0.0; samples.len()]);
            if let Some(value) = abundance.of(&row.record.peak) {
                cells[column] += value;
            }
        }

        Self { samples, compounds }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::corpus::{assemble, Corpus};
    use crate::report::parse_report;

    /// One peak: (library name or "" for none, retention time, height, area).
    pub type Peak<'a> = (&'a str, f64, Option<f64>, Option<f64>);

    /// Build a corpus from per-sample peak lists.
    pub fn corpus_from(samples: &[(&str, &[Peak<'_>])]) -> Corpus {
        let sets = samples
            .iter()
            .map(|(sample, peaks)| {
                let mut text = String::from("\"Peak\",\"R.T.\",\"Height\",\"Area\"\n");
                let mut library = String::from("\"PK\",\"RT\",\"Library/ID\"\n");
                for (index, (name, rt, height, area)) in peaks.iter().enumerate() {
                    let height = height.map(|v| v.to_string()).unwrap_or_default();
                    let area = area.map(|v| v.to_string()).unwrap_or_default();
                    text.push_str(&format!("{},{},{},{}\n", index + 1, rt, height, area));
                    if !name.is_empty() {
                        library.push_str(&format!("{},{},\"{}\"\n", index + 1, rt, name));
                    }
                }
                text.push_str(&library);
                parse_report(&format!("{sample}.csv"), &text).unwrap()
            })
            .collect();
        assemble(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::corpus_from;
    use super::*;

    #[test]
    fn test_abundance_parsing() {
        assert_eq!("AREA".parse::<Abundance>().unwrap(), Abundance::Area);
        assert_eq!("height".parse::<Abundance>().unwrap(), Abundance::Height);
        assert!("width".parse::<Abundance>().is_err());
        assert_eq!(Abundance::Height.to_string(), "Height");
    }

    #[test]
    fn test_pivot_sums_repeated_compounds() {
        let corpus = corpus_from(&[
            (
                "a",
                &[
                    ("Limonene", 1.0, Some(1.0), Some(10.0)),
                    ("Limonene", 2.0, Some(2.0), Some(5.0)),
                    ("", 3.0, Some(3.0), Some(100.0)),
                ],
            ),
            ("b", &[("", 1.0, None, Some(1.0))]),
            ("c", &[("Linalool", 1.0, Some(4.0), None)]),
        ]);

        let pivot = SamplePivot::build(&corpus, corpus.identified(), Abundance::Area);
        let samples: Vec<&str> = pivot.samples.iter().map(|s| &**s).collect();
        assert_eq!(samples, vec!["a", "c"]);
        assert_eq!(pivot.compounds["Limonene"], vec![15.0, 0.0]);
        assert_eq!(pivot.compounds["Linalool"], vec![0.0, 0.0]);

        let pivot = SamplePivot::build(&corpus, corpus.identified(), Abundance::Height);
        assert_eq!(pivot.compounds["Linalool"], vec![0.0, 4.0]);
    }
}
