//! Deserializable representation of a catalog file (`catalog/records.json`).
//!
//! The types mirror the catalog schema so callers can work with records
//! without ad-hoc JSON handling. Use `CatalogIndex` for validation and id
//! lookup; use these structs when only the raw document is needed.

use crate::catalog::identity::{Category, RecordId, RecordType, Status};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Six-record catalog compiled into every binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../catalog/records.json");

// Short `ru-RU` date form used on record cards.
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full catalog document as stored on disk.
pub struct CatalogDocument {
    pub schema_version: String,
    pub title: String,
    pub records: Vec<Record>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One data asset shown as a card.
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub status: Status,
    pub date: NaiveDate,
}

impl Record {
    /// Date as printed on the card, e.g. `15.10.2024`.
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Parse a catalog document without additional validation.
pub fn parse_catalog(data: &str) -> Result<CatalogDocument> {
    let catalog: CatalogDocument = serde_json::from_str(data)?;
    Ok(catalog)
}

/// Read and parse a catalog document from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("parsing {}", path.display()))
}
