use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered multi-valued field, flattened with a literal `|` when displayed or serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct PipeList(Vec<String>);

impl PipeList {
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self) -> String {
        self.0.join("|")
    }
}

impl fmt::Display for PipeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

impl From<PipeList> for String {
    fn from(list: PipeList) -> Self {
        list.joined()
    }
}

impl From<String> for PipeList {
    fn from(s: String) -> Self {
        if s.is_empty() {
            return Self::default();
        }
        Self(s.split('|').map(str::to_string).collect())
    }
}

/// Theater and home release dates. Only ever present as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDates {
    pub theater: String,
    pub home: String,
}

/// Box office gross split positionally into a leading symbol and the remaining amount text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxOffice {
    pub currency_symbol: char,
    pub amount: String, // thousands separators preserved
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub synopsis: Option<String>,
    pub rating: Option<String>, // MPAA-style code, e.g. "PG-13"
    pub genre: Option<PipeList>,
    pub director: Option<PipeList>,
    pub writer: Option<PipeList>,
    pub release_dates: Option<ReleaseDates>,
    pub box_office: Option<BoxOffice>,
    pub runtime: Option<String>,
    pub studio: Option<PipeList>,
}

impl MovieMetadata {
    pub fn theater_release_date(&self) -> Option<&str> {
        self.release_dates.as_ref().map(|d| d.theater.as_str())
    }

    pub fn home_release_date(&self) -> Option<&str> {
        self.release_dates.as_ref().map(|d| d.home.as_str())
    }

    pub fn currency_symbol(&self) -> Option<char> {
        self.box_office.as_ref().map(|b| b.currency_symbol)
    }

    pub fn box_office_amount(&self) -> Option<&str> {
        self.box_office.as_ref().map(|b| b.amount.as_str())
    }

    /// Number of fields that carry a value, counting the date pair and box office as one each.
    pub fn populated_fields(&self) -> usize {
        [
            self.synopsis.is_some(),
            self.rating.is_some(),
            self.genre.is_some(),
            self.director.is_some(),
            self.writer.is_some(),
            self.release_dates.is_some(),
            self.box_office.is_some(),
            self.runtime.is_some(),
            self.studio.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}
