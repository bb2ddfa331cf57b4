//! CLI argument definitions.

use crate::catalog::SearchField;
use crate::config::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plant identification from photos using ONNX classifiers.
#[derive(Debug, Parser)]
#[command(name = "florascan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input image files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Query the reference catalog.
    Catalog {
        /// Catalog action to perform.
        #[command(subcommand)]
        action: CatalogAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ModelsAction {
    /// List configured models.
    List,
    /// Add a new model to configuration.
    Add {
        /// Name for this model (e.g., "alpine-flora").
        name: String,
        /// Path to the ONNX model file.
        #[arg(long)]
        path: PathBuf,
        /// Path to the labels file.
        #[arg(long)]
        labels: PathBuf,
        /// Model input size in pixels (square).
        #[arg(long)]
        input_size: Option<u32>,
        /// Set as the default model.
        #[arg(long)]
        default: bool,
    },
    /// Verify model files exist.
    Check,
}

/// Catalog subcommand actions.
#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// Show catalog summary.
    Info,
    /// Search catalog entries.
    Find {
        /// Search query (case-insensitive substring).
        query: String,
        /// Field to search (name, family, location).
        #[arg(short, long, default_value = "name")]
        field: SearchField,
    },
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Model name from configuration.
    #[arg(short, long, env = "FLORASCAN_MODEL")]
    pub model: Option<String>,

    /// Path to ONNX model file (overrides config).
    #[arg(long, env = "FLORASCAN_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Path to labels file (overrides config).
    #[arg(long, env = "FLORASCAN_LABELS_PATH")]
    pub labels_path: Option<PathBuf>,

    /// Model input size in pixels (overrides config).
    #[arg(long, env = "FLORASCAN_INPUT_SIZE")]
    pub input_size: Option<u32>,

    /// Path to reference catalog spreadsheet (overrides config).
    #[arg(long, env = "FLORASCAN_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Export format (xlsx, csv, json).
    #[arg(short, long, env = "FLORASCAN_FORMAT")]
    pub format: Option<ExportFormat>,

    /// Output file path (default: alongside first input).
    #[arg(short, long, env = "FLORASCAN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report raw confidence without the downward adjustment.
    #[arg(long)]
    pub no_jitter: bool,

    /// Enable CUDA GPU acceleration.
    #[arg(long, conflicts_with = "cpu")]
    pub gpu: bool,

    /// Force CPU inference.
    #[arg(long, conflicts_with = "gpu")]
    pub cpu: bool,

    /// Omit the UTF-8 BOM from CSV exports.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}
