//! Filter state, predicate and derived selector options.
//!
//! Everything here is a pure function of the record set and a `FilterState`:
//! no caching, no side effects beyond debug logging. Output always keeps the
//! catalog order.

use crate::catalog::{Record, RecordId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Selector value meaning "no constraint on this field".
pub const ALL: &str = "all";

/// Current value of one categorical selector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Map raw selector input; the literal `all` is the sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Selection::All
        } else {
            Selection::Only(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value.as_str(),
        }
    }

    /// Exact, case-sensitive comparison unless this is the sentinel.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl Serialize for Selection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// The three categorical fields a selector can constrain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterField {
    Category,
    Type,
    Status,
}

impl FilterField {
    pub const EVERY: [FilterField; 3] = [FilterField::Category, FilterField::Type, FilterField::Status];

    /// Field name as used in catalog JSON and session commands.
    pub fn key(self) -> &'static str {
        match self {
            FilterField::Category => "category",
            FilterField::Type => "type",
            FilterField::Status => "status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::EVERY.into_iter().find(|field| field.key() == key)
    }

    /// Selector caption.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Category => "Категория",
            FilterField::Type => "Тип",
            FilterField::Status => "Статус",
        }
    }

    /// Text shown for the sentinel option.
    pub fn all_label(self) -> &'static str {
        match self {
            FilterField::Category => "Все категории",
            FilterField::Type => "Все типы",
            FilterField::Status => "Все статусы",
        }
    }

    /// The field's value on `record`.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            FilterField::Category => record.category.as_str(),
            FilterField::Type => record.kind.as_str(),
            FilterField::Status => record.status.as_str(),
        }
    }

    /// Display text for an option value of this field.
    pub fn option_label(self, option: &str) -> &str {
        if option == ALL {
            self.all_label()
        } else {
            option
        }
    }
}

/// Search text plus the three selectors.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub category: Selection,
    #[serde(rename = "type")]
    pub kind: Selection,
    pub status: Selection,
}

impl FilterState {
    pub fn selection(&self, field: FilterField) -> &Selection {
        match field {
            FilterField::Category => &self.category,
            FilterField::Type => &self.kind,
            FilterField::Status => &self.status,
        }
    }

    pub fn selection_mut(&mut self, field: FilterField) -> &mut Selection {
        match field {
            FilterField::Category => &mut self.category,
            FilterField::Type => &mut self.kind,
            FilterField::Status => &mut self.status,
        }
    }

    /// True when no control constrains the result.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// All four conditions must hold.
    pub fn matches(&self, record: &Record) -> bool {
        matches_search(record, &self.search)
            && FilterField::EVERY
                .into_iter()
                .all(|field| self.selection(field).admits(field.value_of(record)))
    }
}

/// Case-insensitive substring test against title or description.
///
/// Both sides are lowercased with Unicode simple case mapping; the query is
/// not trimmed, so surrounding spaces take part in the match.
pub fn matches_search(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
}

/// Per-field selector options: the sentinel, then distinct values in
/// first-occurrence order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterOptions {
    pub category: Vec<String>,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub status: Vec<String>,
}

impl FilterOptions {
    pub fn derive(records: &[Record]) -> Self {
        Self {
            category: distinct_options(records, FilterField::Category),
            kind: distinct_options(records, FilterField::Type),
            status: distinct_options(records, FilterField::Status),
        }
    }

    pub fn for_field(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Category => &self.category,
            FilterField::Type => &self.kind,
            FilterField::Status => &self.status,
        }
    }
}

fn distinct_options(records: &[Record], field: FilterField) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for record in records {
        let value = field.value_of(record);
        if !options.iter().any(|existing| existing == value) {
            options.push(value.to_string());
        }
    }
    options
}

/// Records that passed the filter, in catalog order.
///
/// An empty outcome is the "no results" state, not a failure.
#[derive(Clone, Debug)]
pub struct FilterOutcome<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilterOutcome<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_no_results(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|record| record.id).collect()
    }
}

impl<'a> FromIterator<&'a Record> for FilterOutcome<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Recompute the visible subsequence for `state`.
pub fn apply_filter<'a>(records: &'a [Record], state: &FilterState) -> FilterOutcome<'a> {
    let outcome: FilterOutcome<'a> = records.iter().filter(|record| state.matches(record)).collect();
    log::debug!(
        "filter search={:?} category={} type={} status={} -> {}/{} records",
        state.search,
        state.category.as_str(),
        state.kind.as_str(),
        state.status.as_str(),
        outcome.count(),
        records.len()
    );
    outcome
}
