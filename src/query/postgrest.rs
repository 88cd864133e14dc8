//! PostgREST query-string encoding for list requests.
//!
//! The hosted backend speaks PostgREST: filters are `field=op.value`
//! parameters, ordering is `order=a.asc,b.desc`, and the page window is
//! `limit`/`offset`. The total row count comes back in `Content-Range`
//! when the request carries `Prefer: count=exact`.

#[cfg(test)]
#[path = "postgrest_test.rs"]
mod postgrest_test;

use serde_json::Value;

use super::descriptor::{FilterDescriptor, Operator, Pagination, Predicate, Sort, SortOrder};

/// Characters that force double-quoting inside an `in.(...)` list.
const RESERVED: &[char] = &[',', '(', ')', '"', ':'];

/// Encode filters, sorters, pagination, and column selection as query pairs.
#[must_use]
pub fn encode_list_query(
    filters: &FilterDescriptor,
    sorters: &[Sort],
    pagination: Option<&Pagination>,
    select: Option<&str>,
) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(filters.len() + 4);
    params.push(("select".to_owned(), select.unwrap_or("*").to_owned()));
    params.extend(encode_filters(filters));
    if let Some(order) = encode_order(sorters) {
        params.push(("order".to_owned(), order));
    }
    if let Some(page) = pagination {
        params.push(("limit".to_owned(), page.page_size.to_string()));
        params.push(("offset".to_owned(), page.offset().to_string()));
    }
    params
}

/// One query pair per predicate.
#[must_use]
pub fn encode_filters(filters: &FilterDescriptor) -> Vec<(String, String)> {
    filters.into_iter().map(encode_predicate).collect()
}

fn encode_predicate(predicate: &Predicate) -> (String, String) {
    let value = &predicate.value;
    let encoded = match predicate.operator {
        Operator::Eq => format!("eq.{}", scalar(value)),
        Operator::Ne => format!("neq.{}", scalar(value)),
        Operator::Lt => format!("lt.{}", scalar(value)),
        Operator::Lte => format!("lte.{}", scalar(value)),
        Operator::Gt => format!("gt.{}", scalar(value)),
        Operator::Gte => format!("gte.{}", scalar(value)),
        Operator::Contains => format!("ilike.*{}*", scalar(value)),
        Operator::ContainsCase => format!("like.*{}*", scalar(value)),
        Operator::In => format!("in.({})", list(value)),
        Operator::Null => "is.null".to_owned(),
    };
    (predicate.field.clone(), encoded)
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}

fn list(value: &Value) -> String {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().map(scalar).collect(),
        other => vec![scalar(other)],
    };
    items
        .into_iter()
        .map(|item| {
            if item.contains(RESERVED) {
                format!("\"{}\"", item.replace('"', "\\\""))
            } else {
                item
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn encode_order(sorters: &[Sort]) -> Option<String> {
    if sorters.is_empty() {
        return None;
    }
    let parts: Vec<String> = sorters
        .iter()
        .map(|s| {
            let dir = match s.order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            format!("{}.{dir}", s.field)
        })
        .collect();
    Some(parts.join(","))
}

/// Extract the total from a `Content-Range` header such as `0-49/123`.
///
/// Returns `None` when the total is unknown (`0-49/*`) or the header is
/// malformed.
#[must_use]
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}
