//! Florascan - Plant identification CLI tool.
//!
//! This crate identifies plant species from photos using ONNX image
//! classifiers and enriches predictions from a reference catalog.

#![warn(missing_docs)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod inference;
pub mod jitter;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{AnalyzeArgs, CatalogAction, Cli, Command};
use config::{
    Config, InferenceDevice, ModelConfig, config_file_path, load_default_config,
    save_default_config,
};
use inference::PlantClassifier;
use jitter::{FixedJitter, UniformJitter};
use pipeline::{collect_input_files, export_path_for, run_batch};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for florascan CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // Load configuration
    let config = load_default_config()?;
    config::validate_config(&config)?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config, &cli.analyze);
    }

    if cli.inputs.is_empty() {
        return Err(Error::NoValidImageFiles);
    }

    // Default: analyze images
    analyze_images(&cli.inputs, &cli.analyze, &config)
}

/// Analyze input images with the given options.
fn analyze_images(inputs: &[PathBuf], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    // Collect all input files
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }

    info!("Found {} image(s) to process", files.len());

    // Resolve model configuration
    let model_config = resolve_model_config(args, config)?;

    // Resolve device
    let device = if args.gpu {
        InferenceDevice::Gpu
    } else if args.cpu {
        InferenceDevice::Cpu
    } else {
        config.inference.device
    };

    // Load the reference catalog. Missing or unreadable catalogs degrade
    // to placeholder fields rather than aborting the run.
    let catalog_path = args.catalog.clone().or_else(|| config.catalog.path.clone());
    let catalog = match catalog_path {
        Some(path) => catalog::load_catalog(&path),
        None => {
            warn!("No catalog configured, results will use placeholder fields");
            catalog::Catalog::default()
        }
    };
    if !catalog.is_empty() {
        info!("Catalog loaded: {} entries", catalog.len());
    }

    // Build classifier
    info!("Loading model: {}", model_config.path.display());
    let classifier = PlantClassifier::from_config(&model_config, device)?;

    // Create progress bar
    let progress_enabled = !args.quiet && !args.no_progress;
    let progress = progress::create_batch_progress(files.len(), progress_enabled);

    let entries = if args.no_jitter {
        run_batch(
            &files,
            &classifier,
            &FixedJitter(0.0),
            &catalog,
            progress.as_ref(),
        )
    } else {
        run_batch(
            &files,
            &classifier,
            &UniformJitter,
            &catalog,
            progress.as_ref(),
        )
    };

    progress::finish_progress(progress, "Complete");

    for entry in &entries {
        info!(
            "{}: {} ({})",
            entry.image_name,
            entry.label,
            entry.confidence_percent()
        );
    }

    // Export results
    let format = args.format.unwrap_or(config.defaults.format);
    let csv_bom = if args.no_csv_bom {
        false
    } else {
        config.defaults.csv_bom
    };
    let export_path = export_path_for(args.output.as_deref(), files.first().map(PathBuf::as_path), format);
    if let Err(e) = output::export_results(&entries, &export_path, format, csv_bom) {
        error!("Failed to write {}: {}", export_path.display(), e);
        return Err(e);
    }
    info!("Results written to {}", export_path.display());

    // Summary
    let skipped = files.len() - entries.len();
    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} identified, {} skipped in {:.2}s",
        entries.len(),
        skipped,
        total_duration
    );

    if skipped > 0 {
        warn!("{skipped} image(s) produced no result");
    }

    Ok(())
}

/// Resolve the model configuration from CLI overrides and config defaults.
fn resolve_model_config(args: &AnalyzeArgs, config: &Config) -> Result<ModelConfig> {
    // Explicit paths bypass the configured models entirely
    if let (Some(path), Some(labels)) = (args.model_path.clone(), args.labels_path.clone()) {
        return Ok(ModelConfig {
            path,
            labels,
            input_size: args.input_size.unwrap_or(constants::DEFAULT_INPUT_SIZE),
        });
    }

    let model_name = args
        .model
        .clone()
        .or_else(|| config.defaults.model.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no model specified (use -m or set defaults.model in config)".to_string(),
        })?;

    let mut model_config = config::get_model(config, &model_name)?.clone();

    // Individual overrides on top of a configured model
    if let Some(path) = args.model_path.clone() {
        model_config.path = path;
    }
    if let Some(labels) = args.labels_path.clone() {
        model_config.labels = labels;
    }
    if let Some(input_size) = args.input_size {
        model_config.input_size = input_size;
    }

    Ok(model_config)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default because CUDA fallback is
    // expected in auto mode. Use -v for ORT warnings, -vv for info.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            _ => "trace,ort=info".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config, args: &AnalyzeArgs) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Models { action } => handle_models_command(action, config),
        Command::Catalog { action } => handle_catalog_command(action, config, args),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
                println!("Use 'florascan models add' to add models.");
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!(
                    "  florascan models add <name> --path <model.onnx> --labels <labels.txt> --default"
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn handle_models_command(action: cli::ModelsAction, config: &Config) -> Result<()> {
    use cli::ModelsAction;

    match action {
        ModelsAction::List => {
            if config.models.is_empty() {
                println!("No models configured.");
            } else {
                println!("Configured models:");
                for (name, model) in &config.models {
                    let default_marker = config.defaults.model.as_ref().is_some_and(|d| d == name);
                    println!(
                        "  {} ({}px){}",
                        name,
                        model.input_size,
                        if default_marker { " [default]" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ModelsAction::Add {
            name,
            path,
            labels,
            input_size,
            default,
        } => handle_models_add(name, path, labels, input_size, default),
        ModelsAction::Check => {
            for (name, model) in &config.models {
                config::validate_model_config(model)?;
                println!("  {name}: OK");
            }
            Ok(())
        }
    }
}

/// Handle the `models add` command.
fn handle_models_add(
    name: String,
    path: PathBuf,
    labels: PathBuf,
    input_size: Option<u32>,
    set_default: bool,
) -> Result<()> {
    // Validate files exist
    if !path.exists() {
        return Err(Error::ModelFileNotFound { path });
    }
    if !labels.exists() {
        return Err(Error::LabelsFileNotFound { path: labels });
    }

    let mut config = load_default_config()?;

    if config.models.contains_key(&name) {
        return Err(Error::ModelAlreadyExists { name });
    }

    config.models.insert(
        name.clone(),
        ModelConfig {
            path: path.clone(),
            labels: labels.clone(),
            input_size: input_size.unwrap_or(constants::DEFAULT_INPUT_SIZE),
        },
    );

    if set_default {
        config.defaults.model = Some(name.clone());
    }

    let config_path = save_default_config(&config)?;

    println!("Added model '{name}'");
    println!("  Model: {}", path.display());
    println!("  Labels: {}", labels.display());
    println!("  Default: {}", if set_default { "yes" } else { "no" });
    println!("\nConfiguration saved to: {}", config_path.display());

    Ok(())
}

fn handle_catalog_command(
    action: CatalogAction,
    config: &Config,
    args: &AnalyzeArgs,
) -> Result<()> {
    let catalog_path = args.catalog.clone().or_else(|| config.catalog.path.clone());
    let Some(path) = catalog_path else {
        println!("No catalog configured.");
        println!("Set catalog.path in config or pass --catalog <file>.");
        return Ok(());
    };

    let catalog = catalog::load_catalog(&path);

    match action {
        CatalogAction::Info => {
            println!("Catalog: {}", path.display());
            println!("  Entries: {}", catalog.len());
            Ok(())
        }
        CatalogAction::Find { query, field } => {
            let matches = catalog.search(&query, field);
            if matches.is_empty() {
                println!("No entries matching '{query}'.");
            } else {
                for (name, entry) in matches {
                    println!("{name}");
                    println!("  Family: {}", entry.family);
                    println!("  Genus: {}", entry.genus);
                    println!("  Species: {}", entry.species);
                    println!("  Distribution: {}", entry.distribution);
                    println!("  Appearance: {}", entry.appearance);
                }
            }
            Ok(())
        }
    }
}
