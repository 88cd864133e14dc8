//! Filter, sort, and pagination descriptors sent to the list endpoint.
//!
//! These are the structured form of "which records to return". A descriptor
//! is an ordered list of predicates combined with AND by the backend; an
//! empty descriptor means no filtering at all.

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod descriptor_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size used by the list endpoint when a page does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Comparison applied by a single predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive substring match.
    Contains,
    /// Case-sensitive substring match.
    #[serde(rename = "containss")]
    ContainsCase,
    /// Value is a JSON array of candidates.
    In,
    /// Field is null. The predicate value is ignored.
    Null,
}

impl Operator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Contains => "contains",
            Self::ContainsCase => "containss",
            Self::In => "in",
            Self::Null => "null",
        }
    }

    /// Parse the short operator names used on the command line.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "contains" => Some(Self::Contains),
            "containss" => Some(Self::ContainsCase),
            "in" => Some(Self::In),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// One atomic filter condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl Predicate {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self { field: field.into(), operator, value: value.into() }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Contains, value)
    }
}

/// Ordered set of predicates, AND-combined. Empty means unfiltered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDescriptor(Vec<Predicate>);

impl FilterDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.0.push(predicate);
    }

    #[must_use]
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.0.push(predicate);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.0
    }

    /// True when any predicate targets `field`.
    #[must_use]
    pub fn touches(&self, field: &str) -> bool {
        self.0.iter().any(|p| p.field == field)
    }
}

impl From<Vec<Predicate>> for FilterDescriptor {
    fn from(value: Vec<Predicate>) -> Self {
        Self(value)
    }
}

impl<'a> IntoIterator for &'a FilterDescriptor {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Asc }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Desc }
    }

    /// Parse `field`, `field:asc`, or `field:desc`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, order) = match raw.split_once(':') {
            Some((field, "asc")) => (field, SortOrder::Asc),
            Some((field, "desc")) => (field, SortOrder::Desc),
            Some(_) => return None,
            None => (raw, SortOrder::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self { field: field.to_owned(), order })
    }
}

/// Page window requested from the list endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub page_size: u32,
    /// 1-based page number.
    pub current: u32,
}

impl Pagination {
    #[must_use]
    pub fn page_size(page_size: u32) -> Self {
        Self { page_size: page_size.max(1), current: 1 }
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::page_size(DEFAULT_PAGE_SIZE)
    }
}

/// Date-bound input, e.g. "signed on or after".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateCondition {
    pub operator: Operator,
    pub date: time::Date,
}

impl DateCondition {
    #[must_use]
    pub fn on_or_after(date: time::Date) -> Self {
        Self { operator: Operator::Gte, date }
    }

    #[must_use]
    pub fn on_or_before(date: time::Date) -> Self {
        Self { operator: Operator::Lte, date }
    }

    #[must_use]
    pub fn on(date: time::Date) -> Self {
        Self { operator: Operator::Eq, date }
    }

    /// Backend form of the date (`YYYY-MM-DD`).
    #[must_use]
    pub fn value(&self) -> Value {
        Value::String(self.date.to_string())
    }
}
