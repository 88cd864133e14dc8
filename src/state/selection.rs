//! Focused record of a list/detail pairing.
//!
//! Session-scoped only: set by clicking a row, cleared by clicking it again
//! or by navigating away. Never persisted.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::record::{HasId, RecordId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    focused: Option<RecordId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RecordId> {
        self.focused.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    /// Focus `id`, or clear the focus when `id` is already focused.
    pub fn toggle(&mut self, id: RecordId) {
        if self.is_selected(&id) {
            self.focused = None;
        } else {
            self.focused = Some(id);
        }
    }

    pub fn select(&mut self, id: RecordId) {
        self.focused = Some(id);
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// The focused row among `rows`, if it is still present.
    pub fn resolve<'a, T: HasId>(&self, rows: &'a [T]) -> Option<&'a T> {
        let id = self.focused.as_ref()?;
        rows.iter().find(|row| &row.record_id() == id)
    }
}
