//! Result export writers.

mod csv;
mod json;
pub mod progress;
mod types;
mod writer;
mod xlsx;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use types::BatchEntry;
pub use writer::ResultWriter;
pub use xlsx::XlsxWriter;

use crate::config::ExportFormat;
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Export batch entries to a results file.
///
/// Writes the fixed header row plus one row per entry; an empty batch
/// produces a header-only file and still succeeds.
pub fn export_results(
    entries: &[BatchEntry],
    path: &Path,
    format: ExportFormat,
    csv_bom: bool,
) -> Result<()> {
    debug!("Writing {format} export: {}", path.display());

    let mut writer: Box<dyn ResultWriter> = match format {
        ExportFormat::Xlsx => Box::new(XlsxWriter::new(path)),
        ExportFormat::Csv => Box::new(CsvWriter::new(path, csv_bom)?),
        ExportFormat::Json => Box::new(JsonWriter::new(path)),
    };

    writer.write_header()?;
    for entry in entries {
        writer.write_entry(entry)?;
    }
    writer.finalize()?;

    Ok(())
}
