use anyhow::{Context, Result};
use gcms_compare::corpus::{analyze_batch, BatchConfig, BatchOutcome, BatchReport, Upload};
use gcms_compare::normalize::Strictness;
use gcms_compare::report::{ParserConfig, SampleLabel};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::config::Config;
use super::BatchArgs;

/// Resolve the batch configuration: flags over config file over defaults.
fn batch_config(args: &BatchArgs, config: &Config) -> BatchConfig {
    let keep_extension = args.keep_extension || config.parser.keep_extension.unwrap_or(false);
    let strictness = if args.strict {
        Strictness::Strict
    } else {
        config.normalizer.strictness.unwrap_or_default()
    };

    let mut batch = BatchConfig {
        parser: ParserConfig {
            sample_label: if keep_extension {
                SampleLabel::FileName
            } else {
                SampleLabel::FileStem
            },
        },
        strictness,
        ..Default::default()
    };
    if let Some(max_files) = args.max_files.or(config.batch.max_files) {
        batch.max_files = max_files;
    }
    batch
}

/// Read the input reports, analyze them and print the batch report.
pub fn load(args: &BatchArgs) -> Result<(BatchOutcome, Config)> {
    let config = Config::load(args.config.as_deref())?;
    let batch = batch_config(args, &config);

    let uploads = args
        .inputs
        .iter()
        .map(|path| {
            Upload::from_path(path)
                .with_context(|| format!("Failed to read report: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Analyzing {} reports", uploads.len());
    let outcome = analyze_batch(&uploads, &batch).context("Batch analysis failed")?;

    let report = BatchReport::from_outcome(&outcome);
    #[cfg(feature = "colorized_output")]
    {
        eprintln!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        eprintln!("{}", report);
    }

    Ok((outcome, config))
}

/// Open `path` for writing, or stdout when absent.
pub fn output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Log where a table went.
pub fn announce(what: &str, rows: usize, path: Option<&PathBuf>) {
    match path {
        Some(path) => info!("Wrote {} {} to {}", rows, what, path.display()),
        None => info!("Wrote {} {} to stdout", rows, what),
    }
}
