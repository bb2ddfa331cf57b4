//! Input collection and export path resolution.

use crate::config::ExportFormat;
use crate::constants::{DEFAULT_EXPORT_STEM, IMAGE_EXTENSIONS, output_extensions};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Collect image files from paths (files and directories), in input order.
///
/// Directory entries are visited in sorted order so batch output is stable
/// across runs. Non-existent paths are skipped with a warning.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_image_file(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            collect_image_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect image files from a directory, sorted by name.
fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported image format.
fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(OsStr::new(candidate)))
    })
}

/// Resolve the export file path.
///
/// An explicit destination is used as-is. Otherwise the file lands next to
/// the first input (or the current directory) under a default name with
/// the format's extension.
pub fn export_path_for(
    explicit: Option<&Path>,
    first_input: Option<&Path>,
    format: ExportFormat,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let extension = match format {
        ExportFormat::Xlsx => output_extensions::XLSX,
        ExportFormat::Csv => output_extensions::CSV,
        ExportFormat::Json => output_extensions::JSON,
    };

    let dir = first_input
        .and_then(Path::parent)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    dir.join(format!("{DEFAULT_EXPORT_STEM}{extension}"))
}
