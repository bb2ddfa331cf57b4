//! Reference catalog of plant species attributes.

mod loader;
mod types;

pub use loader::load_catalog;
pub use types::{Catalog, CatalogEntry, SearchField};
