//! Read-through record cache with optimistic writes.
//!
//! DESIGN
//! ======
//! Entries are keyed by resource name and record id. A lookup that the
//! backend answers with "not found" is cached as missing, so a dangling
//! reference renders as "not available" without refetching on every render.
//!
//! Writes are two-phase. `stage_*` applies the change to the cache at once
//! and returns a `PendingWrite` remembering what the entry held before;
//! `settle` then either stores the server's record or restores the previous
//! entry. Optimistic creates are keyed by a client-generated UUID until the
//! server assigns the real id, so they cannot collide with rows created
//! elsewhere in the meantime.
//!
//! ERROR HANDLING
//! ==============
//! Failed writes roll back and return the provider error unchanged. Failed
//! reads are not cached.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::provider::{DataProvider, ProviderError};
use crate::record::{Record, RecordId};

type Key = (String, RecordId);

/// Result of a cached lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(Record),
    /// The backend has no record with this id.
    NotAvailable,
}

impl Lookup {
    #[must_use]
    pub fn found(&self) -> Option<&Record> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotAvailable => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteKind {
    Create,
    Update,
    Delete,
}

/// A staged write awaiting the backend's answer.
#[derive(Debug)]
#[must_use = "a staged write must be settled"]
pub struct PendingWrite {
    kind: WriteKind,
    resource: String,
    key: RecordId,
    /// Entry before staging; `None` when the key was not cached.
    previous: Option<Option<Record>>,
}

impl PendingWrite {
    /// Key the staged entry is stored under (a temporary UUID for creates).
    #[must_use]
    pub fn key(&self) -> &RecordId {
        &self.key
    }
}

#[derive(Debug, Default)]
pub struct RecordCache {
    entries: HashMap<Key, Option<Record>>,
}

impl RecordCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry without touching the backend. `Some(None)` means the
    /// record is known to be missing.
    #[must_use]
    pub fn peek(&self, resource: &str, id: &RecordId) -> Option<Option<&Record>> {
        self.entries.get(&key(resource, id)).map(Option::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store rows already fetched by a list call.
    pub fn prime<'a>(&mut self, resource: &str, rows: impl IntoIterator<Item = &'a Record>) {
        for row in rows {
            if let Some(id) = RecordId::of(row) {
                self.entries.insert(key(resource, &id), Some(row.clone()));
            }
        }
    }

    /// Return the cached record or fetch and cache it.
    ///
    /// # Errors
    ///
    /// Returns the provider error for any failure other than not-found.
    pub async fn get_or_fetch<P: DataProvider + ?Sized>(
        &mut self,
        provider: &P,
        resource: &str,
        id: &RecordId,
    ) -> Result<Lookup, ProviderError> {
        let cache_key = key(resource, id);
        if let Some(entry) = self.entries.get(&cache_key) {
            return Ok(entry.clone().map_or(Lookup::NotAvailable, Lookup::Found));
        }
        match provider.get_one(resource, id, None).await {
            Ok(record) => {
                self.entries.insert(cache_key, Some(record.clone()));
                Ok(Lookup::Found(record))
            }
            Err(e) if e.is_not_found() => {
                debug!(resource, id = %id, "cached missing record");
                self.entries.insert(cache_key, None);
                Ok(Lookup::NotAvailable)
            }
            Err(e) => Err(e),
        }
    }

    pub fn invalidate(&mut self, resource: &str, id: &RecordId) {
        self.entries.remove(&key(resource, id));
    }

    pub fn invalidate_resource(&mut self, resource: &str) {
        self.entries.retain(|(name, _), _| name != resource);
    }

    // =========================================================================
    // Optimistic writes
    // =========================================================================

    /// Insert `values` under a temporary UUID key.
    pub fn stage_create(&mut self, resource: &str, values: &Record) -> PendingWrite {
        let temp = RecordId::from(Uuid::new_v4());
        let mut record = values.clone();
        record.insert("id".to_owned(), Value::String(temp.to_string()));
        self.entries.insert(key(resource, &temp), Some(record));
        PendingWrite { kind: WriteKind::Create, resource: resource.to_owned(), key: temp, previous: None }
    }

    /// Merge `changes` into the cached record (if cached) immediately.
    pub fn stage_update(&mut self, resource: &str, id: &RecordId, changes: &Record) -> PendingWrite {
        let cache_key = key(resource, id);
        let previous = self.entries.get(&cache_key).cloned();
        if let Some(Some(record)) = self.entries.get_mut(&cache_key) {
            for (field, value) in changes {
                record.insert(field.clone(), value.clone());
            }
        }
        PendingWrite { kind: WriteKind::Update, resource: resource.to_owned(), key: id.clone(), previous }
    }

    pub fn stage_delete(&mut self, resource: &str, id: &RecordId) -> PendingWrite {
        let previous = self.entries.remove(&key(resource, id));
        PendingWrite { kind: WriteKind::Delete, resource: resource.to_owned(), key: id.clone(), previous }
    }

    /// Apply the backend's answer to a staged write. On success the server's
    /// record replaces the staged one (re-keyed to the server id for
    /// creates); on failure the previous entry is restored.
    ///
    /// # Errors
    ///
    /// Returns `result`'s error after rolling back.
    pub fn settle(&mut self, pending: PendingWrite, result: Result<Option<Record>, ProviderError>) -> Result<Option<Record>, ProviderError> {
        let staged_key = key(&pending.resource, &pending.key);
        match result {
            Ok(record) => {
                if pending.kind == WriteKind::Create {
                    self.entries.remove(&staged_key);
                }
                if let Some(record) = &record {
                    let id = RecordId::of(record).unwrap_or_else(|| pending.key.clone());
                    self.entries.insert(key(&pending.resource, &id), Some(record.clone()));
                }
                Ok(record)
            }
            Err(e) => {
                warn!(resource = %pending.resource, id = %pending.key, error = %e, "write failed; rolling back");
                match pending.previous {
                    Some(entry) => {
                        self.entries.insert(staged_key, entry);
                    }
                    None => {
                        self.entries.remove(&staged_key);
                    }
                }
                Err(e)
            }
        }
    }

    // =========================================================================
    // Write-through helpers
    // =========================================================================

    /// Stage, send, and settle a create.
    ///
    /// # Errors
    ///
    /// Returns the provider error after rolling back.
    pub async fn create_through<P: DataProvider + ?Sized>(
        &mut self,
        provider: &P,
        resource: &str,
        values: &Record,
    ) -> Result<Record, ProviderError> {
        let pending = self.stage_create(resource, values);
        let result = provider.create(resource, values).await.map(Some);
        self.settle(pending, result).map(Option::unwrap_or_default)
    }

    /// Stage, send, and settle an update.
    ///
    /// # Errors
    ///
    /// Returns the provider error after rolling back.
    pub async fn update_through<P: DataProvider + ?Sized>(
        &mut self,
        provider: &P,
        resource: &str,
        id: &RecordId,
        changes: &Record,
    ) -> Result<Record, ProviderError> {
        let pending = self.stage_update(resource, id, changes);
        let result = provider.update(resource, id, changes).await.map(Some);
        self.settle(pending, result).map(Option::unwrap_or_default)
    }

    /// Stage, send, and settle a delete.
    ///
    /// # Errors
    ///
    /// Returns the provider error after restoring the entry.
    pub async fn delete_through<P: DataProvider + ?Sized>(
        &mut self,
        provider: &P,
        resource: &str,
        id: &RecordId,
    ) -> Result<(), ProviderError> {
        let pending = self.stage_delete(resource, id);
        let result = provider.delete(resource, id).await.map(|()| None);
        self.settle(pending, result).map(|_| ())
    }
}

fn key(resource: &str, id: &RecordId) -> Key {
    (resource.to_owned(), id.clone())
}
