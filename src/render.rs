//! Text and JSON projections of a `SessionView`.
//!
//! Rendering is a pure function of the view; nothing here touches filter
//! state. The text layout follows the catalog page top to bottom: header,
//! active filters, result counter, cards, and the empty-state message.

use crate::catalog::{Badge, Record};
use crate::filter::{FilterField, FilterOptions, FilterState};
use crate::session::SessionView;
use serde::Serialize;
use std::fmt;

pub const RESULT_COUNTER_LABEL: &str = "Найдено записей";
pub const RESET_LABEL: &str = "Сбросить фильтры";
pub const OPEN_LABEL: &str = "Открыть";
pub const SEARCH_PLACEHOLDER: &str = "Поиск по базе данных...";
pub const EMPTY_STATE_MESSAGE: &str = "Ничего не найдено. Попробуйте изменить параметры поиска";

const RULE: &str = "==========================";

/// Render the full page for `view`.
pub fn render_view(view: &SessionView<'_>, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "{}", view.title)?;
    writeln!(writer, "{RULE}")?;
    render_filters(view.state, writer)?;
    writeln!(
        writer,
        "{RESULT_COUNTER_LABEL}: {}   [{RESET_LABEL}]",
        view.outcome.count()
    )?;
    writeln!(writer)?;

    if view.outcome.is_no_results() {
        writeln!(writer, "{EMPTY_STATE_MESSAGE}")?;
        return Ok(());
    }

    for record in view.outcome.records() {
        render_card(record, writer)?;
    }
    Ok(())
}

fn render_filters(state: &FilterState, writer: &mut impl fmt::Write) -> fmt::Result {
    let search = if state.search.is_empty() {
        SEARCH_PLACEHOLDER.to_string()
    } else {
        format!("\"{}\"", state.search)
    };
    writeln!(writer, "{:<10}: {search}", "Поиск")?;
    for field in FilterField::EVERY {
        writeln!(
            writer,
            "{:<10}: {}",
            field.label(),
            field.option_label(state.selection(field).as_str())
        )?;
    }
    Ok(())
}

/// One record card.
pub fn render_card(record: &Record, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(
        writer,
        "[#{}] {} {}",
        record.id,
        record.title,
        format_badge(record)
    )?;
    let description = record.description.trim();
    if !description.is_empty() {
        writeln!(writer, "  {description}")?;
    }
    writeln!(
        writer,
        "  {} | {} | {}",
        record.category.as_str(),
        record.kind.as_str(),
        record.display_date()
    )?;
    writeln!(writer, "  [{OPEN_LABEL} →]")?;
    writeln!(writer)?;
    Ok(())
}

fn format_badge(record: &Record) -> String {
    match record.status.badge() {
        Badge::Primary => format!("[{}]", record.status.as_str()),
        Badge::Secondary => format!("({})", record.status.as_str()),
    }
}

/// Selector contents, one field per block, sentinel first.
pub fn render_options(options: &FilterOptions, writer: &mut impl fmt::Write) -> fmt::Result {
    for field in FilterField::EVERY {
        writeln!(writer, "{} ({}):", field.label(), field.key())?;
        for option in options.for_field(field) {
            writeln!(writer, "  {:<14} {}", option, field.option_label(option))?;
        }
    }
    Ok(())
}

/// Machine-readable form of a view.
#[derive(Debug, Serialize)]
pub struct ViewReport<'a> {
    pub title: &'a str,
    pub filters: &'a FilterState,
    pub count: usize,
    pub no_results: bool,
    pub records: Vec<CardReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CardReport<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub display_date: String,
    pub badge: Badge,
}

impl<'a> ViewReport<'a> {
    pub fn new(view: &SessionView<'a>) -> Self {
        Self {
            title: view.title,
            filters: view.state,
            count: view.outcome.count(),
            no_results: view.outcome.is_no_results(),
            records: view
                .outcome
                .records()
                .iter()
                .map(|record| CardReport {
                    record,
                    display_date: record.display_date(),
                    badge: record.status.badge(),
                })
                .collect(),
        }
    }
}
