//! Record catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/records.json` so callers
//! can load a validated snapshot and look records up by id. Types here mirror
//! the schema fields; callers use `CatalogIndex` once the set is loaded.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Badge, Category, RecordId, RecordType, Status};
pub use index::CatalogIndex;
pub use model::{BUNDLED_CATALOG, CatalogDocument, Record, load_catalog_from_path, parse_catalog};
