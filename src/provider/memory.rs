//! In-process provider backed by per-resource tables.
//!
//! DESIGN
//! ======
//! Applies the same filter, sort, and window semantics as the hosted
//! backend via `query::eval`, so page controllers can be exercised without
//! a network. Resources can be marked as failing to simulate transport
//! errors for one section of a page while others keep working.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::{DataProvider, ListRequest, ListResponse, ProviderError};
use crate::query::eval::{matches_all, sort_records};
use crate::record::{Record, RecordId};

const SIMULATED_FAILURE: &str = "simulated network error";

#[derive(Default)]
pub struct MemoryProvider {
    tables: Mutex<HashMap<String, Vec<Record>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows of `resource`.
    pub fn seed(&self, resource: &str, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        lock(&self.tables).insert(resource.to_owned(), rows);
    }

    /// Current rows of `resource`, in insertion order.
    #[must_use]
    pub fn rows(&self, resource: &str) -> Vec<Record> {
        lock(&self.tables).get(resource).cloned().unwrap_or_default()
    }

    /// Make every call on `resource` fail with a transport error.
    pub fn fail(&self, resource: &str) {
        lock(&self.failing).insert(resource.to_owned());
    }

    pub fn heal(&self, resource: &str) {
        lock(&self.failing).remove(resource);
    }

    /// Number of calls (any kind) made against `resource`.
    #[must_use]
    pub fn calls(&self, resource: &str) -> usize {
        lock(&self.calls).get(resource).copied().unwrap_or(0)
    }

    fn enter(&self, resource: &str) -> Result<(), ProviderError> {
        *lock(&self.calls).entry(resource.to_owned()).or_insert(0) += 1;
        if lock(&self.failing).contains(resource) {
            return Err(ProviderError::Request(SIMULATED_FAILURE.to_owned()));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn project(record: &Record, select: Option<&str>) -> Record {
    match select.map(str::trim) {
        None | Some("*" | "") => record.clone(),
        Some(columns) => {
            let wanted: HashSet<&str> = columns.split(',').map(str::trim).collect();
            record
                .iter()
                .filter(|(k, _)| wanted.contains(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        }
    }
}

fn next_numeric_id(rows: &[Record]) -> i64 {
    rows.iter()
        .filter_map(|r| r.get("id").and_then(Value::as_i64))
        .max()
        .map_or(1, |max| max + 1)
}

fn same_id(record: &Record, id: &RecordId) -> bool {
    RecordId::of(record).is_some_and(|rid| &rid == id)
}

#[async_trait::async_trait]
impl DataProvider for MemoryProvider {
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, ProviderError> {
        self.enter(&request.resource)?;
        let tables = lock(&self.tables);
        let mut rows: Vec<Record> = tables
            .get(&request.resource)
            .map(|rows| rows.iter().filter(|r| matches_all(&request.filters, r)).cloned().collect())
            .unwrap_or_default();
        drop(tables);

        sort_records(&mut rows, &request.sorters);
        let total = rows.len() as u64;
        let offset = usize::try_from(request.pagination.offset()).unwrap_or(usize::MAX);
        let limit = request.pagination.page_size as usize;
        let data = rows
            .iter()
            .skip(offset)
            .take(limit)
            .map(|r| project(r, request.select.as_deref()))
            .collect();
        Ok(ListResponse { data, total })
    }

    async fn get_one(&self, resource: &str, id: &RecordId, select: Option<&str>) -> Result<Record, ProviderError> {
        self.enter(resource)?;
        lock(&self.tables)
            .get(resource)
            .and_then(|rows| rows.iter().find(|r| same_id(r, id)))
            .map(|r| project(r, select))
            .ok_or_else(|| ProviderError::NotFound { resource: resource.to_owned(), id: id.clone() })
    }

    async fn create(&self, resource: &str, values: &Record) -> Result<Record, ProviderError> {
        self.enter(resource)?;
        let mut tables = lock(&self.tables);
        let rows = tables.entry(resource.to_owned()).or_default();
        let mut record = values.clone();
        if !record.contains_key("id") {
            record.insert("id".to_owned(), Value::from(next_numeric_id(rows)));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, resource: &str, id: &RecordId, values: &Record) -> Result<Record, ProviderError> {
        self.enter(resource)?;
        let mut tables = lock(&self.tables);
        let row = tables
            .get_mut(resource)
            .and_then(|rows| rows.iter_mut().find(|r| same_id(r, id)))
            .ok_or_else(|| ProviderError::NotFound { resource: resource.to_owned(), id: id.clone() })?;
        for (k, v) in values {
            row.insert(k.clone(), v.clone());
        }
        Ok(row.clone())
    }

    async fn delete(&self, resource: &str, id: &RecordId) -> Result<(), ProviderError> {
        self.enter(resource)?;
        if let Some(rows) = lock(&self.tables).get_mut(resource) {
            rows.retain(|r| !same_id(r, id));
        }
        Ok(())
    }
}
