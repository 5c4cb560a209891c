//! Indexed view of a catalog instance.
//!
//! The index enforces the expected schema version and provides lookup by
//! record id. It is strict about duplicates and unknown schema versions so a
//! catalog with colliding ids never reaches the filter.

use crate::catalog::model::{BUNDLED_CATALOG, CatalogDocument, Record};
use crate::catalog::identity::RecordId;
use crate::schema_loader::{
    SchemaLoadOptions, SchemaLoadResult, load_bundled_schema, load_json_schema,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

// Only one catalog layout exists; reject anything else rather than guess.
const CATALOG_SCHEMA_VERSION: &str = "data_catalog_v1";
const SCHEMA_FILE: &str = "schema/catalog.schema.json";

#[derive(Debug)]
/// Validated, immutable record set plus an id index.
pub struct CatalogIndex {
    title: String,
    records: Vec<Record>,
    by_id: BTreeMap<RecordId, usize>,
}

impl CatalogIndex {
    /// Load and validate a catalog from disk.
    ///
    /// Validates against the catalog schema (a `schema/catalog.schema.json`
    /// next to the catalog directory wins over the bundled copy), checks the
    /// schema version, then builds the id index.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let schema_path = resolve_catalog_schema_path(path);
        Self::from_json_str(&raw, &path.display().to_string(), schema_path.as_deref())
    }

    /// The six-record catalog compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG, "bundled catalog", None)
    }

    /// Build an index from records already in memory.
    ///
    /// Skips schema validation but keeps the id and field checks.
    pub fn from_records(title: impl Into<String>, records: Vec<Record>) -> Result<Self> {
        Self::from_document(CatalogDocument {
            schema_version: CATALOG_SCHEMA_VERSION.to_string(),
            title: title.into(),
            records,
        })
    }

    fn from_json_str(raw: &str, origin: &str, schema_path: Option<&Path>) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).with_context(|| format!("parsing catalog {origin}"))?;
        validate_against_schema(&value, origin, schema_path)?;
        let document: CatalogDocument = serde_json::from_value(value)
            .with_context(|| format!("decoding catalog {origin}"))?;
        let index = Self::from_document(document).with_context(|| format!("indexing {origin}"))?;
        log::info!(
            "loaded catalog '{}' from {origin} ({} records)",
            index.title,
            index.len()
        );
        Ok(index)
    }

    fn from_document(document: CatalogDocument) -> Result<Self> {
        validate_schema_version(&document.schema_version)?;
        if document.title.trim().is_empty() {
            bail!("catalog title must not be empty");
        }
        let by_id = build_index(&document.records)?;
        Ok(Self {
            title: document.title,
            records: document.records,
            by_id,
        })
    }

    /// Catalog title shown as the page header.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Records in catalog order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Resolve a record by id.
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.by_id.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

pub fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

fn build_index(records: &[Record]) -> Result<BTreeMap<RecordId, usize>> {
    if records.is_empty() {
        bail!("catalog contains no records");
    }

    let mut map = BTreeMap::new();
    for (pos, record) in records.iter().enumerate() {
        if record.title.trim().is_empty() {
            bail!("record {} has an empty title", record.id);
        }
        for (field, value) in [
            ("category", record.category.as_str()),
            ("type", record.kind.as_str()),
            ("status", record.status.as_str()),
        ] {
            if value.trim().is_empty() {
                bail!("record {} has an empty {field}", record.id);
            }
        }
        if map.insert(record.id, pos).is_some() {
            bail!("duplicate record id {}", record.id);
        }
    }
    Ok(map)
}

fn validate_against_schema(value: &Value, origin: &str, schema_path: Option<&Path>) -> Result<()> {
    let allowed = allowed_schema_versions();
    let options = SchemaLoadOptions {
        allowed_versions: Some(&allowed),
    };
    let schema: SchemaLoadResult = match schema_path {
        Some(path) => load_json_schema(path, options)
            .with_context(|| format!("loading catalog schema {}", path.display()))?,
        None => load_bundled_schema(options)?,
    };

    if let Err(errors) = schema.compiled.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "catalog {origin} failed {} schema validation:\n{details}",
            schema.schema_version
        );
    }
    Ok(())
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> Option<PathBuf> {
    let base = catalog_path.parent()?.parent()?;
    let candidate = base.join(SCHEMA_FILE);
    candidate.is_file().then_some(candidate)
}
