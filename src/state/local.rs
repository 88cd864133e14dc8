//! In-memory list edited without refetching.
//!
//! DESIGN
//! ======
//! Pages that own a small, user-scoped list (calendar bookings, profile
//! tasks and notes) edit a local copy and push the result to the backend on
//! their own schedule. New entries get `max(existing ids) + 1`, floored at
//! `1`, so an empty list or one holding only non-positive ids starts at `1`
//! and never hands out the `0` draft id. The allocator is local only and
//! does not check for ids created elsewhere in the meantime.
//!
//! `snapshot` / `restore` let a caller undo a local edit when the matching
//! backend write fails.

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

/// Every id up to `i64::MAX` is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("local id space exhausted")]
pub struct IdsExhausted;

/// Entry with a locally allocated numeric id.
pub trait LocalId {
    fn local_id(&self) -> i64;
    fn set_local_id(&mut self, id: i64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalList<T> {
    items: Vec<T>,
}

impl<T> Default for LocalList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: LocalId + Clone> LocalList<T> {
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.local_id() == id)
    }

    /// Id the next `insert` will assign; `None` once `i64::MAX` is taken.
    #[must_use]
    pub fn next_id(&self) -> Option<i64> {
        self.items.iter().map(LocalId::local_id).max().unwrap_or(0).max(0).checked_add(1)
    }

    /// Append `item` under a freshly allocated id and return that id.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` when no id above the current maximum is left; the
    /// list is unchanged.
    pub fn insert(&mut self, mut item: T) -> Result<i64, IdsExhausted> {
        let id = self.next_id().ok_or(IdsExhausted)?;
        item.set_local_id(id);
        self.items.push(item);
        Ok(id)
    }

    /// Replace the entry with `item`'s id. Returns false when absent.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.local_id() == item.local_id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Edit the entry with `id` in place. Returns false when absent.
    pub fn modify(&mut self, id: i64, edit: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.local_id() == id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    /// Remove the entry with `id`, leaving every other entry in place.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.local_id() == id)?;
        Some(self.items.remove(index))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
    }
}
