//! In-process evaluation of filter descriptors against JSON records.
//!
//! Mirrors what the backend does with the same descriptor closely enough
//! for the in-memory provider: string and number forms of a value compare
//! equal, `Contains` is case-insensitive, and ordered comparisons work on
//! numbers or on strings (ISO dates sort lexicographically).

#[cfg(test)]
#[path = "eval_test.rs"]
mod eval_test;

use std::cmp::Ordering;

use serde_json::Value;

use super::descriptor::{FilterDescriptor, Operator, Predicate, Sort, SortOrder};
use crate::record::Record;

/// True when `record` satisfies every predicate.
#[must_use]
pub fn matches_all(filters: &FilterDescriptor, record: &Record) -> bool {
    filters.into_iter().all(|p| matches(p, record))
}

/// True when `record` satisfies `predicate`.
#[must_use]
pub fn matches(predicate: &Predicate, record: &Record) -> bool {
    let field = record.get(&predicate.field).unwrap_or(&Value::Null);
    let target = &predicate.value;
    match predicate.operator {
        Operator::Null => field.is_null(),
        Operator::Eq => loose_eq(field, target),
        Operator::Ne => !loose_eq(field, target),
        Operator::Lt => compare(field, target) == Some(Ordering::Less),
        Operator::Lte => matches!(compare(field, target), Some(Ordering::Less | Ordering::Equal)),
        Operator::Gt => compare(field, target) == Some(Ordering::Greater),
        Operator::Gte => matches!(compare(field, target), Some(Ordering::Greater | Ordering::Equal)),
        Operator::Contains => text(field)
            .zip(text(target))
            .is_some_and(|(hay, needle)| hay.to_lowercase().contains(&needle.to_lowercase())),
        Operator::ContainsCase => text(field)
            .zip(text(target))
            .is_some_and(|(hay, needle)| hay.contains(&needle)),
        Operator::In => match target {
            Value::Array(items) => items.iter().any(|item| loose_eq(field, item)),
            other => loose_eq(field, other),
        },
    }
}

/// Stable sort of `rows` by `sorters`, first sorter most significant.
///
/// Values are ranked booleans, then numbers (numeric strings included), then
/// text, then arrays and objects, so mixed columns still sort in a total
/// order. Nulls and missing fields go last in either direction.
pub fn sort_records(rows: &mut [Record], sorters: &[Sort]) {
    if sorters.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for sort in sorters {
            let left = a.get(&sort.field).unwrap_or(&Value::Null);
            let right = b.get(&sort.field).unwrap_or(&Value::Null);
            let ord = match (left.is_null(), right.is_null(), sort.order) {
                (false, false, SortOrder::Asc) => SortKey::of(left).cmp(&SortKey::of(right)),
                (false, false, SortOrder::Desc) => SortKey::of(right).cmp(&SortKey::of(left)),
                _ => null_order(left, right),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn null_order(left: &Value, right: &Value) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Totally ordered projection of a non-null value; variant order is rank.
#[derive(Debug)]
enum SortKey<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
    Other(String),
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or_else(|| Self::Other(n.to_string()), Self::Number),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Self::Number(n),
                _ => Self::Text(s),
            },
            other => Self::Other(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Other(_) => 3,
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Other(a), Self::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Null, _) | (_, Value::Null) => false,
        _ => text(left).is_some() && text(left) == text(right),
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::String(b)) => a.as_f64()?.partial_cmp(&b.parse::<f64>().ok()?),
        (Value::String(a), Value::Number(b)) => a.parse::<f64>().ok()?.partial_cmp(&b.as_f64()?),
        _ => None,
    }
}
