//! User profile with its embedded task and note lists.
//!
//! Tasks and notes live in JSON columns of the `profiles` row. A profile
//! that has never stored tasks starts with two starter tasks.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::{Deserialize, Serialize};

use super::{lenient_text, text_or_empty};
use crate::record::RecordId;
use crate::state::LocalId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// New, open task. The id is assigned on insertion.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: 0, task: text.into(), completed: false, archived: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub note: String,
    #[serde(default)]
    pub archived: bool,
}

impl Note {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: 0, note: text.into(), archived: false }
    }
}

impl LocalId for Task {
    fn local_id(&self) -> i64 {
        self.id
    }

    fn set_local_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalId for Note {
    fn local_id(&self) -> i64 {
        self.id
    }

    fn set_local_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Entries that can be shelved without deleting them.
pub trait Archivable {
    fn is_archived(&self) -> bool;
}

impl Archivable for Task {
    fn is_archived(&self) -> bool {
        self.archived
    }
}

impl Archivable for Note {
    fn is_archived(&self) -> bool {
        self.archived
    }
}

/// Which half of a task or note list is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArchiveView {
    #[default]
    Active,
    Archived,
}

impl ArchiveView {
    pub fn filter<'a, T: Archivable>(self, items: &'a [T]) -> Vec<&'a T> {
        let want_archived = self == Self::Archived;
        items.iter().filter(|item| item.is_archived() == want_archived).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub fullname: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub streetaddress: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
}

impl Profile {
    /// Stored tasks, or the starter tasks when none were ever saved.
    #[must_use]
    pub fn tasks_or_starter(&self) -> Vec<Task> {
        self.tasks.clone().unwrap_or_else(starter_tasks)
    }

    #[must_use]
    pub fn notes_or_empty(&self) -> Vec<Note> {
        self.notes.clone().unwrap_or_default()
    }
}

#[must_use]
pub fn starter_tasks() -> Vec<Task> {
    vec![
        Task { id: 1, task: "Complete profile update".to_owned(), completed: false, archived: false },
        Task { id: 2, task: "Review new notifications".to_owned(), completed: false, archived: false },
    ]
}

resource! {
    Profile => "profiles",
}
