//! Labels file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read class labels from file.
///
/// # File Format
/// - One label per line, index-aligned with the model's output vector
/// - Blank lines are ignored
///
/// # Errors
/// - Returns error if file cannot be read
/// - Returns error if file contains invalid UTF-8
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }

    Ok(labels)
}
