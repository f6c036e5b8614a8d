use anyhow::{Context, Result};
use gcms_compare::analysis::{overlay_traces, Abundance};
use gcms_compare::export::write_traces_csv;
use std::path::PathBuf;

use super::batch;
use super::BatchArgs;

/// Export per-sample chromatogram traces
pub fn run(args: BatchArgs, abundance: Abundance, output: Option<PathBuf>) -> Result<()> {
    let (outcome, _) = batch::load(&args)?;

    let traces = overlay_traces(&outcome.corpus, abundance);
    let rows = write_traces_csv(&traces, batch::output(output.as_deref())?)
        .context("Failed to write trace CSV")?;
    batch::announce("trace points", rows, output.as_ref());

    Ok(())
}
