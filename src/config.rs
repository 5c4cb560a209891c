//! Runtime configuration shared by the binaries.
//!
//! Catalog selection order: explicit `--catalog` flag, then `CATALOG_PATH`,
//! then the bundled catalog. Logging goes to stderr so stdout stays data.

use crate::catalog::CatalogIndex;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::env;
use std::path::{Path, PathBuf};

pub const CATALOG_PATH_ENV: &str = "CATALOG_PATH";

/// Where the record set comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    /// Resolve using the process environment.
    pub fn resolve(flag: Option<&Path>) -> Self {
        Self::resolve_with(flag, env::var(CATALOG_PATH_ENV).ok())
    }

    /// Resolve from explicit inputs; an empty env value counts as unset.
    pub fn resolve_with(flag: Option<&Path>, env_value: Option<String>) -> Self {
        if let Some(path) = flag {
            return CatalogSource::File(path.to_path_buf());
        }
        match env_value {
            Some(raw) if !raw.trim().is_empty() => CatalogSource::File(PathBuf::from(raw)),
            _ => CatalogSource::Bundled,
        }
    }

    pub fn load(&self) -> Result<CatalogIndex> {
        match self {
            CatalogSource::Bundled => CatalogIndex::bundled().context("loading bundled catalog"),
            CatalogSource::File(path) => CatalogIndex::load(path)
                .with_context(|| format!("loading catalog from {}", path.display())),
        }
    }
}

/// Output encoding for rendered views.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Install the stderr logger; `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    // A second call (tests, embedders) is a no-op; the first logger stays.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
