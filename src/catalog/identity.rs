use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identifier for a catalog record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subject-area grouping of a record (`Финансы`, `Клиенты`, ...).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

/// Kind of data asset a record describes (`Отчёт`, `База данных`, ...).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordType(pub String);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of a record.
///
/// Known variants drive badge styling; `Other` keeps catalogs with new
/// statuses loadable and filterable by their exact text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Current,
    Archived,
    Other(String),
}

/// Visual weight of the status badge on a record card.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Primary,
    Secondary,
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Current => "Актуальный",
            Status::Archived => "Архивный",
            Status::Other(value) => value.as_str(),
        }
    }

    fn from_label(value: &str) -> Self {
        match value {
            "Актуальный" => Status::Current,
            "Архивный" => Status::Archived,
            other => Status::Other(other.to_string()),
        }
    }

    /// Only current records get the primary badge.
    pub fn badge(&self) -> Badge {
        match self {
            Status::Current => Badge::Primary,
            _ => Badge::Secondary,
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}
