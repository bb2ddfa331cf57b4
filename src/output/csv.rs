//! CSV export writer.

use crate::constants::{EXPORT_HEADER, UTF8_BOM};
use crate::error::Result;
use crate::output::{BatchEntry, ResultWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV format result writer.
pub struct CsvWriter {
    writer: BufWriter<File>,
}

impl CsvWriter {
    /// Create a new CSV writer.
    ///
    /// `bom` prepends a UTF-8 BOM so Excel opens the file with the right
    /// encoding.
    pub fn new(path: &Path, bom: bool) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        if bom {
            writer.write_all(UTF8_BOM)?;
        }
        Ok(Self { writer })
    }
}

impl ResultWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", EXPORT_HEADER.join(","))?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &BatchEntry) -> Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{}",
            escape_csv(&entry.image_name),
            escape_csv(&entry.label),
            entry.confidence_percent(),
            escape_csv(&entry.entry.family),
            escape_csv(&entry.entry.genus),
            escape_csv(&entry.entry.species),
            escape_csv(&entry.entry.distribution),
            escape_csv(&entry.entry.appearance),
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Escape a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use tempfile::NamedTempFile;

    fn iris_entry() -> BatchEntry {
        BatchEntry {
            image_name: "iris_01.jpg".to_string(),
            label: "Iris".to_string(),
            display_confidence: 0.8765,
            entry: CatalogEntry {
                family: "Iridaceae".to_string(),
                genus: "Iris".to_string(),
                species: "Iris sp.".to_string(),
                distribution: "Highlands".to_string(),
                appearance: "Purple petals".to_string(),
            },
        }
    }

    #[test]
    fn test_csv_writer_basic() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(file.path(), false).unwrap();

        writer.write_header().unwrap();
        writer.write_entry(&iris_entry()).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Image,Label,Confidence,Family,Genus,Species,Distribution,Appearance"
        );
        assert_eq!(
            lines[1],
            "iris_01.jpg,Iris,87.65%,Iridaceae,Iris,Iris sp.,Highlands,Purple petals"
        );
    }

    #[test]
    fn test_csv_writer_bom() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(file.path(), true).unwrap();
        writer.write_header().unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(file.path()).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
