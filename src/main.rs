//! # gcms-compare
//!
//! A command-line tool for comparing GC-MS instrument reports across samples.
//!
//! ## Usage
//!
//! ```bash
//! # Combine reports into one corpus table (CSV + Parquet)
//! gcms-compare analyze coffee_*.csv -o corpus.csv --parquet corpus.parquet
//!
//! # Compound x sample heatmap, highest total abundance first
//! gcms-compare heatmap coffee_*.csv --order total-abundance -o heatmap.csv
//!
//! # PCA scores of the samples
//! gcms-compare pca coffee_*.csv
//!
//! # Chromatogram traces for an overlay plot
//! gcms-compare overlay coffee_*.csv --value area -o traces.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
