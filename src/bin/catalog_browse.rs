//! One-shot catalog view.
//!
//! Usage:
//!   catalog-browse --search CRM
//!   catalog-browse --category Финансы --format json
//!   catalog-browse --options
//!
//! An empty result is a normal outcome: the empty-state message is printed
//! and the exit code stays 0.

use anyhow::Result;
use clap::Parser;
use data_catalog::{
    ALL, CatalogSource, FilterOptions, FilterState, OutputFormat, Selection, SessionView,
    ViewReport, init_logging, render_options, render_view,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-browse")]
#[command(about = "Filter the data catalog and print the matching records")]
struct Cli {
    /// Case-insensitive text matched against titles and descriptions.
    #[arg(long, default_value = "")]
    search: String,
    /// Exact category, or `all`.
    #[arg(long, default_value = ALL)]
    category: String,
    /// Exact record type, or `all`.
    #[arg(long = "type", default_value = ALL)]
    kind: String,
    /// Exact status, or `all`.
    #[arg(long, default_value = ALL)]
    status: String,
    /// Catalog file (defaults to CATALOG_PATH, then the bundled catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Print the selector options instead of records.
    #[arg(long)]
    options: bool,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog = CatalogSource::resolve(cli.catalog.as_deref()).load()?;
    let options = FilterOptions::derive(catalog.records());

    if cli.options {
        match cli.format {
            OutputFormat::Text => {
                let mut out = String::new();
                render_options(&options, &mut out)?;
                print!("{out}");
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        }
        return Ok(());
    }

    let state = FilterState {
        search: cli.search,
        category: Selection::parse(&cli.category),
        kind: Selection::parse(&cli.kind),
        status: Selection::parse(&cli.status),
    };
    let view = SessionView::compute(&catalog, &options, &state);
    match cli.format {
        OutputFormat::Text => {
            let mut out = String::new();
            render_view(&view, &mut out)?;
            print!("{out}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ViewReport::new(&view))?)
        }
    }
    Ok(())
}
