use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gcms_compare::analysis::{Abundance, CompoundOrder};
use std::path::PathBuf;

mod analyze;
mod batch;
mod config;
mod heatmap;
mod overlay;
mod pca;

/// gcms-compare - Cross-sample comparison of GC-MS reports
#[derive(Parser)]
#[command(name = "gcms-compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Peak quantity to compare.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum AbundanceArg {
    /// Integrated peak area
    #[default]
    Area,
    /// Peak apex height
    Height,
}

impl From<AbundanceArg> for Abundance {
    fn from(arg: AbundanceArg) -> Self {
        match arg {
            AbundanceArg::Area => Abundance::Area,
            AbundanceArg::Height => Abundance::Height,
        }
    }
}

/// Heatmap row order.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OrderArg {
    /// Compound name, A-Z
    #[default]
    Alphabetical,
    /// Summed abundance, highest first
    TotalAbundance,
    /// Variance across samples, highest first
    Variance,
}

impl From<OrderArg> for CompoundOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Alphabetical => CompoundOrder::Alphabetical,
            OrderArg::TotalAbundance => CompoundOrder::TotalAbundance,
            OrderArg::Variance => CompoundOrder::Variance,
        }
    }
}

/// Input reports and ingestion settings shared by every subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Report files to compare (at most 20)
    #[arg(value_name = "REPORT", required = true)]
    inputs: Vec<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use the strict compound-name normalizer
    #[arg(long)]
    strict: bool,

    /// Keep file extensions in sample labels
    #[arg(long)]
    keep_extension: bool,

    /// Upload limit (capped at 20)
    #[arg(long, value_name = "N")]
    max_files: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse reports and export the combined corpus table
    Analyze {
        #[command(flatten)]
        batch: BatchArgs,

        /// CSV output path (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the corpus as Parquet
        #[arg(long, value_name = "FILE")]
        parquet: Option<PathBuf>,

        /// Export only identified compounds
        #[arg(long)]
        identified_only: bool,
    },

    /// Build the compound x sample heatmap table
    Heatmap {
        #[command(flatten)]
        batch: BatchArgs,

        /// Quantity summed into each cell
        #[arg(long, default_value = "area", value_enum)]
        value: AbundanceArg,

        /// Row order
        #[arg(long, default_value = "alphabetical", value_enum)]
        order: OrderArg,

        /// Keep only compounds containing this text
        #[arg(long)]
        search: Option<String>,

        /// Keep siloxane and other contaminant compounds
        #[arg(long)]
        keep_contaminants: bool,

        /// CSV output path (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Project samples onto two principal components
    Pca {
        #[command(flatten)]
        batch: BatchArgs,

        /// CSV output path (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export per-sample chromatogram traces for overlay plots
    Overlay {
        #[command(flatten)]
        batch: BatchArgs,

        /// Quantity on the y axis
        #[arg(long, default_value = "height", value_enum)]
        value: AbundanceArg,

        /// CSV output path (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            batch,
            output,
            parquet,
            identified_only,
        } => analyze::run(batch, output, parquet, identified_only),
        Commands::Heatmap {
            batch,
            value,
            order,
            search,
            keep_contaminants,
            output,
        } => heatmap::run(
            batch,
            value.into(),
            order.into(),
            search,
            keep_contaminants,
            output,
        ),
        Commands::Pca { batch, output } => pca::run(batch, output),
        Commands::Overlay {
            batch,
            value,
            output,
        } => overlay::run(batch, value.into(), output),
    }
}
