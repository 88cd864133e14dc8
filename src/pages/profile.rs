//! Signed-in user's profile with personal task and note lists.
//!
//! DESIGN
//! ======
//! Tasks and notes are edited in local lists so the page reacts at once.
//! Every edit then writes the whole list back to the `profiles` row. When
//! that write fails, the list is restored to its state before the edit and
//! only that list reports the failure; the profile and the other list stay
//! as they were.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::Serialize;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::AppError;
use crate::provider::{ProviderError, decode_record};
use crate::record::{Record, RecordId};
use crate::resources::{ArchiveView, Note, Profile, Resource, Task};
use crate::state::{LocalList, QueryState};

pub struct ProfilePage {
    user: Option<RecordId>,
    profile: QueryState<Profile>,
    pub tasks: LocalList<Task>,
    pub notes: LocalList<Note>,
    pub task_view: ArchiveView,
    pub note_view: ArchiveView,
    task_error: Option<String>,
    note_error: Option<String>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilePage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: None,
            profile: QueryState::Loading,
            tasks: LocalList::default(),
            notes: LocalList::default(),
            task_view: ArchiveView::Active,
            note_view: ArchiveView::Active,
            task_error: None,
            note_error: None,
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.data().and_then(<[Profile]>::first)
    }

    /// Placeholder while the user or the profile is not yet available.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        if self.user.is_none() {
            return Some("Loading...".to_owned());
        }
        self.profile.status_text("profile")
    }

    #[must_use]
    pub fn tasks_status(&self) -> Option<&str> {
        self.task_error.as_deref()
    }

    #[must_use]
    pub fn notes_status(&self) -> Option<&str> {
        self.note_error.as_deref()
    }

    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.task_view.filter(self.tasks.items())
    }

    #[must_use]
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.note_view.filter(self.notes.items())
    }

    /// Read the current user's profile and seed the local lists.
    pub async fn load(&mut self, ctx: &AppContext) {
        self.user = match ctx.current_user_id().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "identity lookup failed");
                None
            }
        };
        let Some(user) = self.user.clone() else {
            return;
        };
        let fetched = ctx.provider.get_one(Profile::NAME, &user, None).await.and_then(decode_record::<Profile>);
        match fetched {
            Ok(profile) => {
                self.tasks = LocalList::from_items(profile.tasks_or_starter());
                self.notes = LocalList::from_items(profile.notes_or_empty());
                self.profile = QueryState::Data(vec![profile]);
            }
            Err(e) => {
                warn!(user = %user, error = %e, "profile load failed");
                self.profile = QueryState::Error(e.to_string());
            }
        }
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Add a task; blank text is ignored, and so is a list with no id left.
    /// Returns the new task's id.
    ///
    /// # Errors
    ///
    /// Backend failure; the task is not kept.
    pub async fn add_task(&mut self, ctx: &AppContext, text: &str) -> Result<Option<i64>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let mut id = None;
        self.mutate_tasks(ctx, |tasks| {
            id = tasks.insert(Task::new(text)).ok();
            id.is_some()
        })
        .await?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Backend failure; the task reverts.
    pub async fn toggle_task(&mut self, ctx: &AppContext, id: i64) -> Result<bool, AppError> {
        self.mutate_tasks(ctx, |tasks| tasks.modify(id, |t| t.completed = !t.completed)).await
    }

    /// # Errors
    ///
    /// Backend failure; the task reverts.
    pub async fn edit_task(&mut self, ctx: &AppContext, id: i64, text: &str) -> Result<bool, AppError> {
        self.mutate_tasks(ctx, |tasks| tasks.modify(id, |t| text.clone_into(&mut t.task))).await
    }

    /// # Errors
    ///
    /// Backend failure; the task reverts.
    pub async fn set_task_archived(&mut self, ctx: &AppContext, id: i64, archived: bool) -> Result<bool, AppError> {
        self.mutate_tasks(ctx, |tasks| tasks.modify(id, |t| t.archived = archived)).await
    }

    /// # Errors
    ///
    /// Backend failure; the task is restored.
    pub async fn delete_task(&mut self, ctx: &AppContext, id: i64) -> Result<bool, AppError> {
        self.mutate_tasks(ctx, |tasks| tasks.remove(id).is_some()).await
    }

    async fn mutate_tasks(&mut self, ctx: &AppContext, edit: impl FnOnce(&mut LocalList<Task>) -> bool) -> Result<bool, AppError> {
        let Some(profile_id) = self.profile().map(|p| p.id.clone()) else {
            return Ok(false);
        };
        let before = self.tasks.snapshot();
        if !edit(&mut self.tasks) {
            return Ok(false);
        }
        match write_column(ctx, &profile_id, "tasks", self.tasks.items()).await {
            Ok(()) => {
                self.task_error = None;
                Ok(true)
            }
            Err(e) => {
                self.tasks.restore(before);
                self.task_error = Some("Error saving tasks.".to_owned());
                Err(e)
            }
        }
    }

    // =========================================================================
    // Notes
    // =========================================================================

    /// Add a note; blank text is ignored, and so is a list with no id left.
    /// Returns the new note's id.
    ///
    /// # Errors
    ///
    /// Backend failure; the note is not kept.
    pub async fn add_note(&mut self, ctx: &AppContext, text: &str) -> Result<Option<i64>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let mut id = None;
        self.mutate_notes(ctx, |notes| {
            id = notes.insert(Note::new(text)).ok();
            id.is_some()
        })
        .await?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Backend failure; the note reverts.
    pub async fn edit_note(&mut self, ctx: &AppContext, id: i64, text: &str) -> Result<bool, AppError> {
        self.mutate_notes(ctx, |notes| notes.modify(id, |n| text.clone_into(&mut n.note))).await
    }

    /// # Errors
    ///
    /// Backend failure; the note reverts.
    pub async fn set_note_archived(&mut self, ctx: &AppContext, id: i64, archived: bool) -> Result<bool, AppError> {
        self.mutate_notes(ctx, |notes| notes.modify(id, |n| n.archived = archived)).await
    }

    /// # Errors
    ///
    /// Backend failure; the note is restored.
    pub async fn delete_note(&mut self, ctx: &AppContext, id: i64) -> Result<bool, AppError> {
        self.mutate_notes(ctx, |notes| notes.remove(id).is_some()).await
    }

    async fn mutate_notes(&mut self, ctx: &AppContext, edit: impl FnOnce(&mut LocalList<Note>) -> bool) -> Result<bool, AppError> {
        let Some(profile_id) = self.profile().map(|p| p.id.clone()) else {
            return Ok(false);
        };
        let before = self.notes.snapshot();
        if !edit(&mut self.notes) {
            return Ok(false);
        }
        match write_column(ctx, &profile_id, "notes", self.notes.items()).await {
            Ok(()) => {
                self.note_error = None;
                Ok(true)
            }
            Err(e) => {
                self.notes.restore(before);
                self.note_error = Some("Error saving notes.".to_owned());
                Err(e)
            }
        }
    }
}

/// Write one JSON list column of the profile row.
async fn write_column<T: Serialize>(ctx: &AppContext, profile_id: &RecordId, column: &str, items: &[T]) -> Result<(), AppError> {
    let mut values = Record::new();
    values.insert(column.to_owned(), serde_json::to_value(items).map_err(ProviderError::from)?);
    match ctx.provider.update(Profile::NAME, profile_id, &values).await {
        Ok(_) => {
            info!(profile = %profile_id, column, count = items.len(), "profile list saved");
            Ok(())
        }
        Err(e) => {
            warn!(profile = %profile_id, column, error = %e, "profile list write failed; rolling back");
            Err(e.into())
        }
    }
}
