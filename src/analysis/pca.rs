use std::sync::Arc;

use log::debug;
use nalgebra::DMatrix;

use super::{Abundance, AnalysisError, SamplePivot};
use crate::corpus::Corpus;

/// Fewest samples a projection is computed for.
pub const MIN_PCA_SAMPLES: usize = 2;

/// Fewest distinct compounds a projection is computed for.
pub const MIN_PCA_COMPOUNDS: usize = 2;

const COMPONENTS: usize = 2;

/// Two-component projection of the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaResult {
    /// Sample labels, in upload order.
    pub samples: Vec<Arc<str>>,
    /// (PC1, PC2) score of each sample.
    pub scores: Vec<[f64; 2]>,
    /// Fraction of total variance explained by PC1 and PC2.
    pub explained_variance_ratio: [f64; 2],
    /// Compound labels of the loading rows, sorted by name.
    pub compounds: Vec<String>,
    /// (PC1, PC2) loading of each compound.
    pub loadings: Vec<[f64; 2]>,
}

impl PcaResult {
    /// Iterate over (sample, PC1, PC2).
    pub fn points(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.samples
            .iter()
            .zip(&self.scores)
            .map(|(sample, [pc1, pc2])| (&**sample, *pc1, *pc2))
    }

    /// Axis label with explained variance, e.g. `PC1 (62.5%)`.
    pub fn axis_label(&self, component: usize) -> String {
        let ratio = self.explained_variance_ratio.get(component).copied().unwrap_or(0.0);
        format!("PC{} ({:.1}%)", component + 1, ratio * 100.0)
    }
}

/// Center each column and scale it to unit population variance.
/// Constant columns become all zero.
fn standardize(matrix: &mut DMatrix<f64>) {
    let rows = matrix.nrows() as f64;
    for mut column in matrix.column_iter_mut() {
        let mean = column.sum() / rows;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / rows;
        let std = variance.sqrt();
        for value in column.iter_mut() {
            *value = if std > 0.0 { (*value - mean) / std } else { 0.0 };
        }
    }
}

/// Project samples onto the first two principal components of their
/// standardized compound areas.
///
/// Uses the identified subset summed per sample and compound. Component
/// signs are chosen so the largest-magnitude loading is positive.
pub fn compute_pca(corpus: &Corpus) -> Result<PcaResult, AnalysisError> {
    let pivot = SamplePivot::build(corpus, corpus.identified(), Abundance::Area);
    let (n_samples, n_compounds) = (pivot.samples.len(), pivot.compounds.len());
    if n_samples < MIN_PCA_SAMPLES || n_compounds < MIN_PCA_COMPOUNDS {
        return Err(AnalysisError::InsufficientData {
            samples: n_samples,
            compounds: n_compounds,
            min: MIN_PCA_SAMPLES.max(MIN_PCA_COMPOUNDS),
        });
    }

    let columns: Vec<&Vec<f64>> = pivot.compounds.values().collect();
    let mut data = DMatrix::from_fn(n_samples, n_compounds, |r, c| columns[c][r]);
    standardize(&mut data);

    let svd = data.clone().svd(false, true);
    let v_t = svd.v_t.ok_or(AnalysisError::Decomposition)?;

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

    let total: f64 = svd.singular_values.iter().map(|s| s * s).sum();
    let mut explained_variance_ratio = [0.0; COMPONENTS];
    let mut loadings = vec![[0.0; COMPONENTS]; n_compounds];
    let mut scores = vec![[0.0; COMPONENTS]; n_samples];

    for (component, &index) in order.iter().take(COMPONENTS).enumerate() {
        let singular = svd.singular_values[index];
        if total > 0.0 {
            explained_variance_ratio[component] = singular * singular / total;
        }

        let mut axis = v_t.row(index).transpose();
        let pivot_loading = axis
            .iter()
            .copied()
            .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
        if pivot_loading < 0.0 {
            axis.neg_mut();
        }

        let projected = &data * &axis;
        for (sample, score) in projected.iter().enumerate() {
            scores[sample][component] = *score;
        }
        for (compound, loading) in axis.iter().enumerate() {
            loadings[compound][component] = *loading;
        }
    }

    debug!(
        "pca: {} samples x {} compounds, explained {:.3} / {:.3}",
        n_samples, n_compounds, explained_variance_ratio[0], explained_variance_ratio[1]
    );

    Ok(PcaResult {
        samples: pivot.samples,
        scores,
        explained_variance_ratio,
        compounds: pivot.compounds.into_keys().collect(),
        loadings,
    })
}
