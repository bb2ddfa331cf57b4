//! XLSX export writer.

use crate::constants::EXPORT_HEADER;
use crate::error::{Error, Result};
use crate::output::{BatchEntry, ResultWriter};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::{Path, PathBuf};

/// XLSX workbook result writer.
///
/// Rows are buffered in the workbook and written to disk on
/// [`ResultWriter::finalize`].
pub struct XlsxWriter {
    workbook: Workbook,
    path: PathBuf,
    row: u32,
}

impl XlsxWriter {
    /// Create a new XLSX writer targeting `path`.
    pub fn new(path: &Path) -> Self {
        let mut workbook = Workbook::new();
        let _ = workbook.add_worksheet();
        Self {
            workbook,
            path: path.to_path_buf(),
            row: 0,
        }
    }

    fn write_row(&mut self, values: &[&str], format: Option<&Format>) -> Result<()> {
        let row = self.row;
        let path = self.path.clone();
        let worksheet = self
            .workbook
            .worksheet_from_index(0)
            .map_err(|e| export_error(&path, e))?;

        for (col, value) in values.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let col = col as u16;
            match format {
                Some(format) => worksheet
                    .write_string_with_format(row, col, *value, format)
                    .map_err(|e| export_error(&path, e))?,
                None => worksheet
                    .write_string(row, col, *value)
                    .map_err(|e| export_error(&path, e))?,
            };
        }

        self.row += 1;
        Ok(())
    }
}

impl ResultWriter for XlsxWriter {
    fn write_header(&mut self) -> Result<()> {
        let bold = Format::new().set_bold();
        self.write_row(&EXPORT_HEADER, Some(&bold))
    }

    fn write_entry(&mut self, entry: &BatchEntry) -> Result<()> {
        let confidence = entry.confidence_percent();
        let values = [
            entry.image_name.as_str(),
            entry.label.as_str(),
            confidence.as_str(),
            entry.entry.family.as_str(),
            entry.entry.genus.as_str(),
            entry.entry.species.as_str(),
            entry.entry.distribution.as_str(),
            entry.entry.appearance.as_str(),
        ];
        self.write_row(&values, None)
    }

    fn finalize(&mut self) -> Result<()> {
        self.workbook
            .save(&self.path)
            .map_err(|e| export_error(&self.path, e))
    }
}

fn export_error(path: &Path, source: XlsxError) -> Error {
    Error::ExportWrite {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}
