//! TOML configuration file support.
//!
//! Settings shared by every subcommand can live in a config file instead of
//! being repeated on the command line:
//!
//! ```toml
//! # gcms-compare.toml
//! [parser]
//! keep_extension = false
//!
//! [normalizer]
//! strictness = "strict"
//!
//! [batch]
//! max_files = 12
//!
//! [heatmap]
//! filter_contaminants = true
//! contaminants = ["siloxane", "phthalate"]
//! ```
//!
//! Command-line flags override the file; the file overrides defaults.

use anyhow::{Context, Result};
use gcms_compare::normalize::Strictness;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for gcms-compare.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Report parser settings.
    #[serde(default)]
    pub parser: ParserSection,

    /// Compound-name normalizer settings.
    #[serde(default)]
    pub normalizer: NormalizerSection,

    /// Batch ingestion settings.
    #[serde(default)]
    pub batch: BatchSection,

    /// Heatmap settings.
    #[serde(default)]
    pub heatmap: HeatmapSection,
}

/// `[parser]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ParserSection {
    /// Keep the file extension in sample labels.
    pub keep_extension: Option<bool>,
}

/// `[normalizer]` section.
#[derive(Debug, Default, Deserialize)]
pub struct NormalizerSection {
    /// `"standard"` or `"strict"`.
    pub strictness: Option<Strictness>,
}

/// `[batch]` section.
#[derive(Debug, Default, Deserialize)]
pub struct BatchSection {
    /// Upload limit, capped at 20.
    pub max_files: Option<usize>,
}

/// `[heatmap]` section.
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapSection {
    /// Drop contaminant compounds from heatmaps.
    pub filter_contaminants: Option<bool>,

    /// Contaminant keywords replacing the built-in siloxane list.
    pub contaminants: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
