//! Resource query composer: UI inputs in, one filter descriptor out.
//!
//! DESIGN
//! ======
//! Each page owns a `FilterComposer` naming the field each optional input
//! targets. `compose` is a pure function of the current inputs, so callers
//! can re-run it on every keystroke and compare the result to decide
//! whether a new request is needed.
//!
//! PRECEDENCE
//! ==========
//! With the default `SearchOverridesParent`, a non-blank search suppresses
//! the parent-id predicate entirely: typing into a list's search box
//! ignores whichever parent record is selected. `Combine` ANDs both.
//! Status and date predicates are always added when set.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use super::descriptor::{DateCondition, FilterDescriptor, Operator, Predicate};
use crate::record::RecordId;

/// How free-text search interacts with a selected parent record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precedence {
    /// Search wins; the parent predicate is dropped while search is set.
    #[default]
    SearchOverridesParent,
    /// Both predicates apply (AND).
    Combine,
}

/// Current values of a page's optional filter inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryInputs {
    pub search: Option<String>,
    pub parent: Option<RecordId>,
    pub status: Option<String>,
    pub date: Option<DateCondition>,
}

impl QueryInputs {
    /// Search text with surrounding whitespace removed; `None` when blank.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn status_value(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_text().is_none()
            && self.parent.is_none()
            && self.status_value().is_none()
            && self.date.is_none()
    }
}

/// Per-page mapping of filter inputs onto resource fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterComposer {
    search_field: Option<String>,
    parent_field: Option<String>,
    status_field: Option<String>,
    date_field: Option<String>,
    precedence: Precedence,
}

impl FilterComposer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_on(mut self, field: impl Into<String>) -> Self {
        self.search_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn parent_on(mut self, field: impl Into<String>) -> Self {
        self.parent_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn status_on(mut self, field: impl Into<String>) -> Self {
        self.status_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn date_on(mut self, field: impl Into<String>) -> Self {
        self.date_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Build the descriptor for `inputs`.
    ///
    /// Predicate order is search, parent, status, date. Inputs whose field
    /// is not configured on this composer are ignored.
    #[must_use]
    pub fn compose(&self, inputs: &QueryInputs) -> FilterDescriptor {
        let mut filters = FilterDescriptor::new();

        let search = self
            .search_field
            .as_ref()
            .zip(inputs.search_text())
            .map(|(field, text)| Predicate::contains(field.as_str(), text));
        let searching = search.is_some();
        if let Some(predicate) = search {
            filters.push(predicate);
        }

        let parent_allowed = !searching || self.precedence == Precedence::Combine;
        if parent_allowed {
            if let Some((field, id)) = self.parent_field.as_ref().zip(inputs.parent.as_ref()) {
                filters.push(Predicate::new(field.as_str(), Operator::Eq, id.to_value()));
            }
        }

        if let Some((field, status)) = self.status_field.as_ref().zip(inputs.status_value()) {
            filters.push(Predicate::eq(field.as_str(), status));
        }

        if let Some((field, cond)) = self.date_field.as_ref().zip(inputs.date.as_ref()) {
            filters.push(Predicate::new(field.as_str(), cond.operator, cond.value()));
        }

        filters
    }
}
