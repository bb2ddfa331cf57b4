//! Catalog type definitions.

use crate::constants::UNKNOWN_FIELD;
use serde::Serialize;
use std::collections::HashMap;

/// Descriptive attributes for a single species.
///
/// Every field falls back to `"unknown"` when the source row carries no
/// value for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Taxonomic family.
    pub family: String,
    /// Taxonomic genus.
    pub genus: String,
    /// Species designation.
    pub species: String,
    /// Where the plant is found.
    pub distribution: String,
    /// Visual description.
    pub appearance: String,
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self {
            family: UNKNOWN_FIELD.to_string(),
            genus: UNKNOWN_FIELD.to_string(),
            species: UNKNOWN_FIELD.to_string(),
            distribution: UNKNOWN_FIELD.to_string(),
            appearance: UNKNOWN_FIELD.to_string(),
        }
    }
}

impl CatalogEntry {
    /// The all-`"unknown"` placeholder used for labels with no catalog row.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Catalog field a search query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Match against the species name (the lookup key).
    Name,
    /// Match against the family field.
    Family,
    /// Match against the distribution field.
    Distribution,
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "family" => Ok(Self::Family),
            "distribution" | "location" => Ok(Self::Distribution),
            other => Err(format!("unknown search field: {other}")),
        }
    }
}

/// Read-only mapping from species name to descriptive attributes.
///
/// Populated once at startup and never mutated; replace the whole catalog
/// to pick up source changes. Safe to share across threads without locking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from already-parsed entries.
    pub fn from_entries(entries: HashMap<String, CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Look up a species by exact name. No fuzzy matching.
    pub fn get(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.get(label)
    }

    /// Look up a species, substituting the `"unknown"` placeholder on miss.
    pub fn get_or_unknown(&self, label: &str) -> CatalogEntry {
        self.entries.get(label).cloned().unwrap_or_default()
    }

    /// Number of species in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over one catalog field.
    ///
    /// Results are sorted by species name for stable output.
    pub fn search(&self, query: &str, field: SearchField) -> Vec<(&str, &CatalogEntry)> {
        let needle = query.to_lowercase();
        let mut hits: Vec<(&str, &CatalogEntry)> = self
            .entries
            .iter()
            .filter(|(name, entry)| {
                let haystack = match field {
                    SearchField::Name => name.as_str(),
                    SearchField::Family => entry.family.as_str(),
                    SearchField::Distribution => entry.distribution.as_str(),
                };
                haystack.to_lowercase().contains(&needle)
            })
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        hits.sort_by_key(|(name, _)| *name);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris_entry() -> CatalogEntry {
        CatalogEntry {
            family: "Iridaceae".to_string(),
            genus: "Iris".to_string(),
            species: "Iris sp.".to_string(),
            distribution: "Highlands".to_string(),
            appearance: "Purple petals".to_string(),
        }
    }

    fn catalog_with_iris() -> Catalog {
        let mut entries = HashMap::new();
        entries.insert("Iris".to_string(), iris_entry());
        Catalog::from_entries(entries)
    }

    #[test]
    fn test_get_exact_match() {
        let catalog = catalog_with_iris();
        assert_eq!(catalog.get("Iris"), Some(&iris_entry()));
        assert_eq!(catalog.get("iris"), None);
    }

    #[test]
    fn test_get_or_unknown_substitutes_placeholder() {
        let catalog = catalog_with_iris();
        let entry = catalog.get_or_unknown("Unknown-X");
        assert_eq!(entry.family, "unknown");
        assert_eq!(entry.genus, "unknown");
        assert_eq!(entry.species, "unknown");
        assert_eq!(entry.distribution, "unknown");
        assert_eq!(entry.appearance, "unknown");
    }

    #[test]
    fn test_search_by_family_case_insensitive() {
        let catalog = catalog_with_iris();
        let hits = catalog.search("iridac", SearchField::Family);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "Iris");
        assert!(catalog.search("rosaceae", SearchField::Family).is_empty());
    }

    #[test]
    fn test_search_field_from_str() {
        assert_eq!("name".parse::<SearchField>().ok(), Some(SearchField::Name));
        assert_eq!(
            "location".parse::<SearchField>().ok(),
            Some(SearchField::Distribution)
        );
        assert!("petals".parse::<SearchField>().is_err());
    }
}
