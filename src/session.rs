//! Event-driven browsing session over one catalog.
//!
//! A session owns the filter state and shares the record set read-only. Each
//! event goes through the pure `transition` function and the visible set is
//! recomputed before `apply` returns, so a view never mixes old and new
//! filters.

use crate::catalog::{CatalogIndex, Record, RecordId};
use crate::filter::{FilterField, FilterOptions, FilterOutcome, FilterState, Selection, apply_filter};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// One user interaction with a filter control.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterEvent {
    Search(String),
    Select(FilterField, Selection),
    Reset,
}

/// Next filter state after `event`.
pub fn transition(mut state: FilterState, event: FilterEvent) -> FilterState {
    match event {
        FilterEvent::Search(query) => state.search = query,
        FilterEvent::Select(field, selection) => *state.selection_mut(field) = selection,
        FilterEvent::Reset => state = FilterState::default(),
    }
    state
}

/// Receiver for the per-card "open" action.
///
/// The catalog defines no destination for opened records; embedders plug in
/// whatever navigation they have.
pub trait OpenHandler {
    fn open(&mut self, record: &Record);
}

/// Default hook: records the request in the log and does nothing else.
#[derive(Debug, Default)]
pub struct LogOpenHandler;

impl OpenHandler for LogOpenHandler {
    fn open(&mut self, record: &Record) {
        log::warn!(
            "open requested for record {} ('{}') but no target is configured",
            record.id,
            record.title
        );
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum OpenError {
    #[error("record {0} does not exist in this catalog")]
    UnknownRecord(RecordId),
    #[error("record {0} is hidden by the current filters")]
    NotVisible(RecordId),
}

/// Session over a shared catalog.
pub struct Session<H = LogOpenHandler> {
    catalog: Arc<CatalogIndex>,
    options: FilterOptions,
    state: FilterState,
    visible: Vec<RecordId>,
    opener: H,
}

impl Session<LogOpenHandler> {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self::with_open_handler(catalog, LogOpenHandler)
    }
}

impl<H: OpenHandler> Session<H> {
    pub fn with_open_handler(catalog: Arc<CatalogIndex>, opener: H) -> Self {
        let options = FilterOptions::derive(catalog.records());
        let mut session = Self {
            catalog,
            options,
            state: FilterState::default(),
            visible: Vec::new(),
            opener,
        };
        session.recompute();
        session
    }

    /// Apply one event and recompute the visible records.
    pub fn apply(&mut self, event: FilterEvent) -> &FilterState {
        let previous = std::mem::take(&mut self.state);
        self.state = transition(previous, event);
        self.recompute();
        &self.state
    }

    /// Shorthand for `apply(FilterEvent::Reset)`.
    pub fn reset(&mut self) -> &FilterState {
        self.apply(FilterEvent::Reset)
    }

    fn recompute(&mut self) {
        self.visible = apply_filter(self.catalog.records(), &self.state).ids();
    }

    /// Hand a visible record to the open hook.
    pub fn open(&mut self, id: RecordId) -> Result<(), OpenError> {
        let record = self
            .catalog
            .record(id)
            .ok_or(OpenError::UnknownRecord(id))?;
        if !self.visible.contains(&id) {
            return Err(OpenError::NotVisible(id));
        }
        self.opener.open(record);
        Ok(())
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn open_handler(&self) -> &H {
        &self.opener
    }

    fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible.iter().filter_map(|&id| self.catalog.record(id))
    }

    /// Snapshot of everything a renderer needs.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            title: self.catalog.title(),
            state: &self.state,
            options: &self.options,
            outcome: self.visible_records().collect(),
        }
    }
}

/// Render input: catalog title, filters, options and the filtered records.
#[derive(Clone, Debug)]
pub struct SessionView<'a> {
    pub title: &'a str,
    pub state: &'a FilterState,
    pub options: &'a FilterOptions,
    pub outcome: FilterOutcome<'a>,
}

impl<'a> SessionView<'a> {
    /// One-shot view without a session, for callers that only filter once.
    pub fn compute(
        catalog: &'a CatalogIndex,
        options: &'a FilterOptions,
        state: &'a FilterState,
    ) -> Self {
        Self {
            title: catalog.title(),
            state,
            options,
            outcome: apply_filter(catalog.records(), state),
        }
    }
}

/// A parsed line of the session command language.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionCommand {
    Filter(FilterEvent),
    Open(RecordId),
    Options,
    Quit,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum EventParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' requires a value")]
    MissingValue(&'static str),
    #[error("invalid record id '{0}'")]
    InvalidId(String),
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },
}

impl FromStr for SessionCommand {
    type Err = EventParseError;

    /// Parse `verb [argument]`; the argument is the rest of the line after the
    /// first whitespace character (space or tab), so `search` values keep
    /// inner and trailing whitespace.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = match line.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((at, sep)) => (&line[..at], Some(&line[at + sep.len_utf8()..])),
            None => (line, None),
        };
        if verb.is_empty() {
            return Err(EventParseError::Empty);
        }

        match verb {
            "search" => Ok(SessionCommand::Filter(FilterEvent::Search(
                rest.unwrap_or_default().to_string(),
            ))),
            "reset" => no_argument("reset", rest, SessionCommand::Filter(FilterEvent::Reset)),
            "options" => no_argument("options", rest, SessionCommand::Options),
            "quit" | "exit" => no_argument("quit", rest, SessionCommand::Quit),
            "open" => {
                let raw = rest
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
                    .ok_or(EventParseError::MissingValue("open"))?;
                let id = raw
                    .parse::<i64>()
                    .map_err(|_| EventParseError::InvalidId(raw.to_string()))?;
                Ok(SessionCommand::Open(RecordId(id)))
            }
            other => {
                let field = FilterField::from_key(other)
                    .ok_or_else(|| EventParseError::UnknownCommand(other.to_string()))?;
                let value = rest
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .ok_or(EventParseError::MissingValue(field.key()))?;
                Ok(SessionCommand::Filter(FilterEvent::Select(
                    field,
                    Selection::parse(value),
                )))
            }
        }
    }
}

fn no_argument(
    command: &'static str,
    rest: Option<&str>,
    parsed: SessionCommand,
) -> Result<SessionCommand, EventParseError> {
    match rest.map(str::trim) {
        Some(extra) if !extra.is_empty() => Err(EventParseError::UnexpectedArgument { command }),
        _ => Ok(parsed),
    }
}
