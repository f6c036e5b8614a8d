use anyhow::{Context, Result};
use gcms_compare::analysis::compute_pca;
use gcms_compare::export::write_pca_csv;
use log::info;
use std::path::PathBuf;

use super::batch;
use super::BatchArgs;

/// Project samples onto two principal components
pub fn run(args: BatchArgs, output: Option<PathBuf>) -> Result<()> {
    let (outcome, _) = batch::load(&args)?;

    let pca = compute_pca(&outcome.corpus).context("Failed to compute PCA")?;
    info!("{}, {}", pca.axis_label(0), pca.axis_label(1));

    let rows = write_pca_csv(&pca, batch::output(output.as_deref())?)
        .context("Failed to write PCA CSV")?;
    batch::announce("sample scores", rows, output.as_ref());

    Ok(())
}
