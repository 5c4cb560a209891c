//! Shared library for the data catalog.
//!
//! The crate exposes the record catalog, the filter core (predicate, selector
//! options, filter state) and the event-driven session used by the binaries.
//! Public items here form the contract the binaries depend on.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod render;
mod schema_loader;
pub mod session;

pub use catalog::{
    Badge, CatalogDocument, CatalogIndex, Category, Record, RecordId, RecordType, Status,
    load_catalog_from_path,
};
pub use config::{CatalogSource, OutputFormat, init_logging};
pub use filter::{
    ALL, FilterField, FilterOptions, FilterOutcome, FilterState, Selection, apply_filter,
};
pub use render::{ViewReport, render_options, render_view};
pub use session::{
    EventParseError, FilterEvent, LogOpenHandler, OpenError, OpenHandler, Session,
    SessionCommand, SessionView, transition,
};
