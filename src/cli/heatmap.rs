use anyhow::{Context, Result};
use gcms_compare::analysis::{pivot_heatmap, Abundance, CompoundOrder, HeatmapOptions};
use gcms_compare::export::write_heatmap_csv;
use std::path::PathBuf;

use super::batch;
use super::BatchArgs;

/// Build the compound x sample heatmap table
pub fn run(
    args: BatchArgs,
    abundance: Abundance,
    order: CompoundOrder,
    search: Option<String>,
    keep_contaminants: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let (outcome, config) = batch::load(&args)?;

    let mut options = HeatmapOptions {
        abundance,
        order,
        search,
        ..Default::default()
    };
    if let Some(filter) = config.heatmap.filter_contaminants {
        options.filter_contaminants = filter;
    }
    if keep_contaminants {
        options.filter_contaminants = false;
    }
    if let Some(keywords) = config.heatmap.contaminants {
        options.contaminants = keywords;
    }

    let heatmap = pivot_heatmap(&outcome.corpus, &options).context("Failed to build heatmap")?;
    let rows = write_heatmap_csv(&heatmap, batch::output(output.as_deref())?)
        .context("Failed to write heatmap CSV")?;
    batch::announce("heatmap rows", rows, output.as_ref());

    Ok(())
}
