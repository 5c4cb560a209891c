//! Event-driven catalog session on stdin.
//!
//! Each input line is one control event (`search <text>`, `category <value>`,
//! `type <value>`, `status <value>`, `reset`, `open <id>`, `options`, `quit`).
//! The view is re-rendered after every filter event; with `--format json`
//! every stdout line (views, options, opened records) is one NDJSON object so
//! the output can be piped.

use anyhow::{Context, Result};
use clap::Parser;
use data_catalog::{
    CatalogSource, FilterOptions, OpenHandler, OutputFormat, Record, Session, SessionCommand,
    ViewReport, init_logging, render_options, render_view,
};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "catalog-session")]
#[command(about = "Apply catalog filter events read from stdin, one per line")]
struct Cli {
    /// Catalog file (defaults to CATALOG_PATH, then the bundled catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Announces opened records on stdout; the catalog has no real target.
///
/// In JSON mode the announcement is its own NDJSON object so the stream stays
/// machine-readable.
struct AnnounceOpen {
    format: OutputFormat,
}

impl OpenHandler for AnnounceOpen {
    fn open(&mut self, record: &Record) {
        match self.format {
            OutputFormat::Text => println!("open #{}: {}", record.id, record.title),
            OutputFormat::Json => println!(
                "{}",
                json!({"opened": record.id, "title": record.title})
            ),
        }
    }
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
    let catalog = Arc::new(CatalogSource::resolve(cli.catalog.as_deref()).load()?);
    let mut session = Session::with_open_handler(catalog, AnnounceOpen { format: cli.format });
    emit_view(&session, cli.format)?;

    let stdin = io::stdin();
    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line.with_context(|| format!("reading stdin line {}", idx + 1))?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("catalog-session: line {}: {err}", idx + 1);
                continue;
            }
        };

        match command {
            SessionCommand::Filter(event) => {
                session.apply(event);
                emit_view(&session, cli.format)?;
            }
            SessionCommand::Open(id) => {
                if let Err(err) = session.open(id) {
                    eprintln!("catalog-session: line {}: {err}", idx + 1);
                }
            }
            SessionCommand::Options => emit_options(session.options(), cli.format)?,
            SessionCommand::Quit => break,
        }
        io::stdout().flush().context("flushing stdout")?;
    }
    Ok(())
}

fn emit_view<H: OpenHandler>(session: &Session<H>, format: OutputFormat) -> Result<()> {
    let view = session.view();
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            render_view(&view, &mut out)?;
            println!("{out}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&ViewReport::new(&view))?),
    }
    Ok(())
}

fn emit_options(options: &FilterOptions, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            render_options(options, &mut out)?;
            println!("{out}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(options)?),
    }
    Ok(())
}
