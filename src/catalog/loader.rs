//! Catalog loading from spreadsheet sources.

use crate::catalog::{Catalog, CatalogEntry};
use crate::constants::{UNKNOWN_FIELD, catalog_columns};
use crate::error::{Error, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};

/// Load the reference catalog from a spreadsheet file.
///
/// Fails softly: a missing file, an unreadable workbook, or malformed rows
/// log a warning and yield an empty catalog. Classification still works
/// against an empty catalog; every lookup enriches to `"unknown"` fields.
///
/// The source format is chosen by extension: `.xlsx`/`.xls` workbooks and
/// `.csv` files are supported.
pub fn load_catalog(path: &Path) -> Catalog {
    match try_load(path) {
        Ok(entries) => {
            info!("Loaded catalog: {} species from {}", entries.len(), path.display());
            Catalog::from_entries(entries)
        }
        Err(e) => {
            warn!("Failed to load catalog from {}: {e}", path.display());
            Catalog::default()
        }
    }
}

fn try_load(path: &Path) -> Result<HashMap<String, CatalogEntry>> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("xlsx" | "xls") => load_workbook(path),
        Some("csv") => load_csv(path),
        _ => Err(Error::UnsupportedCatalogFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load entries from the first sheet of an Excel workbook.
fn load_workbook(path: &Path) -> Result<HashMap<String, CatalogEntry>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| Error::CatalogRead {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::CatalogRead {
            path: path.to_path_buf(),
            source: "workbook has no sheets".into(),
        })?
        .map_err(|e| Error::CatalogRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    // First row is the header.
    let rows = range.rows().skip(1).map(|row| {
        row.iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
    });

    Ok(entries_from_rows(rows))
}

/// Load entries from a CSV file with a header row.
fn load_csv(path: &Path) -> Result<HashMap<String, CatalogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::CatalogRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::CatalogRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    Ok(entries_from_rows(rows.into_iter()))
}

/// Build the name-keyed entry map from raw rows.
///
/// Rows with an empty name column are skipped; duplicate names overwrite
/// earlier entries (last row wins). Column 4 of the source is present but
/// intentionally unmapped.
fn entries_from_rows(rows: impl Iterator<Item = Vec<String>>) -> HashMap<String, CatalogEntry> {
    let mut entries = HashMap::new();

    for row in rows {
        let Some(name) = field(&row, catalog_columns::NAME) else {
            continue;
        };

        entries.insert(
            name,
            CatalogEntry {
                family: field_or_unknown(&row, catalog_columns::FAMILY),
                genus: field_or_unknown(&row, catalog_columns::GENUS),
                species: field_or_unknown(&row, catalog_columns::SPECIES),
                distribution: field_or_unknown(&row, catalog_columns::DISTRIBUTION),
                appearance: field_or_unknown(&row, catalog_columns::APPEARANCE),
            },
        );
    }

    entries
}

fn field(row: &[String], index: usize) -> Option<String> {
    row.get(index)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn field_or_unknown(row: &[String], index: usize) -> String {
    field(row, index).unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_catalog() {
        let file = csv_catalog(
            "Name,Family,Genus,Species,Id,Distribution,Appearance\n\
             Iris,Iridaceae,Iris,Iris sp.,12,Highlands,Purple petals\n",
        );

        let catalog = load_catalog(file.path());
        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("Iris").unwrap();
        assert_eq!(entry.family, "Iridaceae");
        assert_eq!(entry.genus, "Iris");
        assert_eq!(entry.species, "Iris sp.");
        assert_eq!(entry.distribution, "Highlands");
        assert_eq!(entry.appearance, "Purple petals");
    }

    #[test]
    fn test_rows_with_empty_name_are_skipped() {
        let file = csv_catalog(
            "Name,Family,Genus,Species,Id,Distribution,Appearance\n\
             ,Iridaceae,Iris,Iris sp.,1,Highlands,Purple petals\n\
             Rose,Rosaceae,Rosa,Rosa sp.,2,Lowlands,Red petals\n",
        );

        let catalog = load_catalog(file.path());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Rose").is_some());
    }

    #[test]
    fn test_duplicate_names_last_row_wins() {
        let file = csv_catalog(
            "Name,Family,Genus,Species,Id,Distribution,Appearance\n\
             Iris,Iridaceae,Iris,Iris sp.,1,Highlands,Purple petals\n\
             Iris,Iridaceae,Iris,Iris sp.,2,Lowlands,Blue petals\n",
        );

        let catalog = load_catalog(file.path());
        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("Iris").unwrap();
        assert_eq!(entry.distribution, "Lowlands");
        assert_eq!(entry.appearance, "Blue petals");
    }

    #[test]
    fn test_missing_fields_default_to_unknown() {
        let file = csv_catalog(
            "Name,Family,Genus,Species,Id,Distribution,Appearance\n\
             Iris,Iridaceae\n",
        );

        let catalog = load_catalog(file.path());
        let entry = catalog.get("Iris").unwrap();
        assert_eq!(entry.family, "Iridaceae");
        assert_eq!(entry.genus, "unknown");
        assert_eq!(entry.distribution, "unknown");
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let catalog = load_catalog(Path::new("/nonexistent/plants.xlsx"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unsupported_extension_yields_empty_catalog() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let catalog = load_catalog(file.path());
        assert!(catalog.is_empty());
    }
}
