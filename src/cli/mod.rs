//! CLI argument parsing and command handling.

mod args;

pub use args::{AnalyzeArgs, CatalogAction, Cli, Command, ConfigAction, ModelsAction};
