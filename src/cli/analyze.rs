use anyhow::{Context, Result};
use gcms_compare::export::{write_corpus_csv, write_corpus_parquet, RowSelection};
use log::info;
use std::path::PathBuf;

use super::batch;
use super::BatchArgs;

/// Parse reports and export the corpus table
pub fn run(
    args: BatchArgs,
    output: Option<PathBuf>,
    parquet: Option<PathBuf>,
    identified_only: bool,
) -> Result<()> {
    let (outcome, _) = batch::load(&args)?;

    let selection = if identified_only {
        RowSelection::Identified
    } else {
        RowSelection::All
    };

    let rows = write_corpus_csv(&outcome.corpus, selection, batch::output(output.as_deref())?)
        .context("Failed to write corpus CSV")?;
    batch::announce("corpus rows", rows, output.as_ref());

    if let Some(path) = parquet {
        let stats = write_corpus_parquet(&path, &outcome)
            .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        info!("{}", stats);
    }

    Ok(())
}
