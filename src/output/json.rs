//! JSON export writer.

use crate::error::{Error, Result};
use crate::output::{BatchEntry, ResultWriter};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JSON result file structure.
#[derive(Debug, Serialize)]
struct JsonResultFile<'a> {
    /// Number of classified images.
    total_results: usize,
    /// Number of distinct species labels.
    unique_labels: usize,
    /// Per-image results.
    results: &'a [BatchEntry],
}

/// Writer producing one JSON document for the whole batch.
///
/// Entries are collected in memory and serialized on
/// [`ResultWriter::finalize`].
pub struct JsonWriter {
    entries: Vec<BatchEntry>,
    path: PathBuf,
}

impl JsonWriter {
    /// Create a new JSON writer targeting `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            entries: Vec::new(),
            path: path.to_path_buf(),
        }
    }
}

impl ResultWriter for JsonWriter {
    fn write_header(&mut self) -> Result<()> {
        // The envelope carries the header information; nothing to emit here.
        Ok(())
    }

    fn write_entry(&mut self, entry: &BatchEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let unique_labels = self
            .entries
            .iter()
            .map(|e| e.label.as_str())
            .collect::<HashSet<_>>()
            .len();

        let document = JsonResultFile {
            total_results: self.entries.len(),
            unique_labels,
            results: &self.entries,
        };

        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &document).map_err(|e| {
            Error::ExportWrite {
                path: self.path.clone(),
                source: Box::new(e),
            }
        })
    }
}
