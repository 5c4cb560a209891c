//! Shared JSON Schema loader for catalog documents.
//!
//! Schemas come either from disk or from the copy bundled into the crate.
//! Callers can restrict the accepted `schema_version` and get back a compiled
//! validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Catalog schema compiled into the crate.
pub(crate) const BUNDLED_CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls which schemas are accepted before compilation.
#[derive(Default)]
pub(crate) struct SchemaLoadOptions<'a> {
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

// Where the schema_version const lives inside a catalog schema.
const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Read a schema from `path` and compile it.
pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_json_schema(schema, &path.display().to_string(), options)
}

/// Compile the schema bundled into the crate.
pub(crate) fn load_bundled_schema(options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(BUNDLED_CATALOG_SCHEMA).context("parsing bundled catalog schema")?;
    compile_json_schema(schema, "bundled catalog schema", options)
}

fn compile_json_schema(
    schema: Value,
    origin: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(&schema)
        .ok_or_else(|| anyhow!("{origin} missing schema_version const"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling {origin}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema
        .pointer(SCHEMA_VERSION_POINTER)
        .and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
