use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Abundance, AnalysisError, SamplePivot};
use crate::corpus::Corpus;

/// Column-bleed contaminants filtered from heatmaps by default.
pub const SILOXANE_KEYWORDS: [&str; 6] = [
    "siloxane",
    "cyclotrisiloxane",
    "cyclotetrasiloxane",
    "cyclopentasiloxane",
    "cyclohexasiloxane",
    "cyclododecasiloxane",
];

/// Row order of a heatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundOrder {
    /// By compound name (default).
    #[default]
    Alphabetical,
    /// By summed abundance across samples, highest first.
    TotalAbundance,
    /// By sample variance across samples, highest first.
    Variance,
}

impl fmt::Display for CompoundOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundOrder::Alphabetical => write!(f, "alphabetical"),
            CompoundOrder::TotalAbundance => write!(f, "total-abundance"),
            CompoundOrder::Variance => write!(f, "variance"),
        }
    }
}

impl FromStr for CompoundOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "alphabetical" | "name" => Ok(CompoundOrder::Alphabetical),
            "total-abundance" | "total" => Ok(CompoundOrder::TotalAbundance),
            "variance" => Ok(CompoundOrder::Variance),
            _ => Err(format!(
                "Unknown order '{}'. Valid options: alphabetical, total-abundance, variance",
                s
            )),
        }
    }
}

/// Heatmap preparation options.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    /// Quantity summed into each cell.
    pub abundance: Abundance,
    /// Drop compounds matching a contaminant keyword.
    pub filter_contaminants: bool,
    /// Contaminant keywords, matched case-insensitively as substrings.
    pub contaminants: Vec<String>,
    /// Keep only compounds containing this text (case-insensitive).
    pub search: Option<String>,
    /// Row order.
    pub order: CompoundOrder,
    /// Display `ln(1 + x)` instead of raw values.
    pub log_scale: bool,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            abundance: Abundance::default(),
            filter_contaminants: true,
            contaminants: SILOXANE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            search: None,
            order: CompoundOrder::default(),
            log_scale: false,
        }
    }
}

/// Whether `compound` contains any of `keywords`, ignoring case.
pub fn is_contaminant<S: AsRef<str>>(compound: &str, keywords: &[S]) -> bool {
    let lower = compound.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .any(|k| !k.is_empty() && lower.contains(&k))
}

/// Compound × sample abundance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    compounds: Vec<String>,
    samples: Vec<Arc<str>>,
    values: Vec<f64>,
    abundance: Abundance,
    log_scale: bool,
}

impl Heatmap {
    /// Row labels, in display order.
    pub fn compounds(&self) -> &[String] {
        &self.compounds
    }

    /// Column labels, in upload order.
    pub fn samples(&self) -> &[Arc<str>] {
        &self.samples
    }

    /// Summed abundance of one cell.
    pub fn value(&self, compound: usize, sample: usize) -> f64 {
        self.values[compound * self.samples.len() + sample]
    }

    /// Raw values of one row.
    pub fn row(&self, compound: usize) -> &[f64] {
        let width = self.samples.len();
        &self.values[compound * width..(compound + 1) * width]
    }

    /// Iterate over (compound, raw row values).
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.compounds
            .iter()
            .enumerate()
            .map(move |(i, name)| (name.as_str(), self.row(i)))
    }

    /// Cell value as displayed, log-transformed when enabled.
    pub fn display_value(&self, compound: usize, sample: usize) -> f64 {
        let value = self.value(compound, sample);
        if self.log_scale {
            value.ln_1p()
        } else {
            value
        }
    }

    /// Quantity in the cells.
    pub fn abundance(&self) -> Abundance {
        self.abundance
    }

    /// Whether display values are log-transformed.
    pub fn is_log_scale(&self) -> bool {
        self.log_scale
    }

    /// Colour-scale label, e.g. `Log(Area)`.
    pub fn value_label(&self) -> String {
        if self.log_scale {
            format!("Log({})", self.abundance)
        } else {
            self.abundance.to_string()
        }
    }

    /// Number of compound rows.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Whether the heatmap has no rows.
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Pivot the identified subset into a compound × sample heatmap.
///
/// Compounds whose row sums to zero are dropped. Fails with
/// [`AnalysisError::NoData`] when no row survives filtering.
pub fn pivot_heatmap(corpus: &Corpus, options: &HeatmapOptions) -> Result<Heatmap, AnalysisError> {
    let search = options
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let rows = corpus.identified().filter(|row| {
        let name = row.compound.as_str();
        if options.filter_contaminants && is_contaminant(name, &options.contaminants) {
            return false;
        }
        match &search {
            Some(term) => name.to_lowercase().contains(term),
            None => true,
        }
    });

    let pivot = SamplePivot::build(corpus, rows, options.abundance);
    let mut rows: Vec<(String, Vec<f64>)> = pivot
        .compounds
        .into_iter()
        .filter(|(_, cells)| cells.iter().sum::<f64>() > 0.0)
        .collect();

    if rows.is_empty() {
        return Err(AnalysisError::NoData);
    }

    match options.order {
        CompoundOrder::Alphabetical => {}
        CompoundOrder::TotalAbundance => rows.sort_by(|a, b| {
            let (ta, tb) = (a.1.iter().sum::<f64>(), b.1.iter().sum::<f64>());
            tb.partial_cmp(&ta).unwrap_or(Ordering::Equal)
        }),
        CompoundOrder::Variance => rows.sort_by(|a, b| {
            sample_variance(&b.1)
                .partial_cmp(&sample_variance(&a.1))
                .unwrap_or(Ordering::Equal)
        }),
    }

    debug!(
        "heatmap: {} compounds x {} samples",
        rows.len(),
        pivot.samples.len()
    );

    let mut compounds = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len() * pivot.samples.len());
    for (name, cells) in rows {
        compounds.push(name);
        values.extend(cells);
    }

    Ok(Heatmap {
        compounds,
        samples: pivot.samples,
        values,
        abundance: options.abundance,
        log_scale: options.log_scale,
    })
}
