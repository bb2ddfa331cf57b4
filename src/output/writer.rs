//! Result writer trait definition.

use crate::error::Result;
use crate::output::BatchEntry;

/// Trait for writing batch classification results.
pub trait ResultWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single batch entry.
    fn write_entry(&mut self, entry: &BatchEntry) -> Result<()>;

    /// Finalize the output (flush, save, close).
    fn finalize(&mut self) -> Result<()>;
}
