//! Booking calendar for the signed-in user.
//!
//! DESIGN
//! ======
//! Bookings are fetched once, filtered to the current user, and then edited
//! in a `LocalList`: saving a draft allocates `max(cal_id) + 1` (never below 1), edits and
//! deletes apply in memory without another round trip. Only the owner of a
//! booking may change it.

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;

use tracing::debug;

use crate::context::AppContext;
use crate::query::{FilterComposer, Sort};
use crate::record::RecordId;
use crate::resources::{Booking, Resource, format_hours};
use crate::state::{IdsExhausted, ListQuery, LocalList};

/// Owner id used when nobody is signed in.
pub const FALLBACK_USER: &str = "default-user";

const PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("only the owner can change this booking")]
    NotOwner,

    #[error("booking {0} not found")]
    Missing(i64),

    #[error("an unsaved booking cannot be deleted")]
    Unsaved,

    #[error(transparent)]
    IdsExhausted(#[from] IdsExhausted),
}

pub struct CalendarPage {
    query: ListQuery<Booking>,
    bookings: LocalList<Booking>,
    user: RecordId,
    loaded: bool,
}

impl Default for CalendarPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarPage {
    #[must_use]
    pub fn new() -> Self {
        let query = ListQuery::new(Booking::NAME, FilterComposer::new().parent_on("id"), PAGE_SIZE)
            .with_sort(Sort::asc("starttime"));
        Self { query, bookings: LocalList::default(), user: RecordId::new(FALLBACK_USER), loaded: false }
    }

    #[must_use]
    pub fn user(&self) -> &RecordId {
        &self.user
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        self.bookings.items()
    }

    /// "Loading bookings..." and friends; `None` once bookings are shown.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        if self.loaded { None } else { self.query.status_text("bookings") }
    }

    /// Resolve the user and load their bookings into the local list. Later
    /// calls are no-ops unless the signed-in user changed.
    pub async fn load(&mut self, ctx: &AppContext) {
        let user = match ctx.current_user_id().await {
            Ok(Some(id)) => id,
            Ok(None) => RecordId::new(FALLBACK_USER),
            Err(e) => {
                debug!(error = %e, "identity lookup failed; using fallback user");
                RecordId::new(FALLBACK_USER)
            }
        };
        if self.query.set_parent(Some(user.clone())) {
            self.loaded = false;
        }
        self.user = user;
        self.query.refresh(ctx.provider.as_ref()).await;
        if self.loaded {
            return;
        }
        if let Some(rows) = self.query.state().data() {
            self.bookings = LocalList::from_items(rows.to_vec());
            self.loaded = true;
        }
    }

    /// Draft for a selected time range, owned by the current user.
    #[must_use]
    pub fn draft(&self, start: time::OffsetDateTime, end: time::OffsetDateTime) -> Booking {
        Booking::draft(self.user.clone(), start, end)
    }

    #[must_use]
    pub fn is_editable(&self, booking: &Booking) -> bool {
        booking.is_owned_by(&self.user)
    }

    /// Save a draft as a new booking, or overwrite an existing one. Returns
    /// the booking's `cal_id`.
    ///
    /// # Errors
    ///
    /// `NotOwner` when the booking belongs to someone else, `Missing` when
    /// an existing booking is no longer in the list, `IdsExhausted` when a
    /// draft has no id left to take.
    pub fn save(&mut self, booking: Booking) -> Result<i64, BookingError> {
        if !self.is_editable(&booking) {
            return Err(BookingError::NotOwner);
        }
        if booking.is_draft() {
            return Ok(self.bookings.insert(booking)?);
        }
        let cal_id = booking.cal_id;
        let owned = self.bookings.get(cal_id).map(|existing| self.is_editable(existing)).ok_or(BookingError::Missing(cal_id))?;
        if !owned {
            return Err(BookingError::NotOwner);
        }
        self.bookings.replace(booking);
        Ok(cal_id)
    }

    /// # Errors
    ///
    /// `Unsaved` for a draft id, `Missing` when absent, `NotOwner` when the
    /// booking belongs to someone else.
    pub fn delete(&mut self, cal_id: i64) -> Result<Booking, BookingError> {
        if cal_id == crate::resources::booking::DRAFT_ID {
            return Err(BookingError::Unsaved);
        }
        let existing = self.bookings.get(cal_id).ok_or(BookingError::Missing(cal_id))?;
        if !self.is_editable(existing) {
            return Err(BookingError::NotOwner);
        }
        self.bookings.remove(cal_id).ok_or(BookingError::Missing(cal_id))
    }

    /// Duration label for a booking, e.g. "1h 30m".
    #[must_use]
    pub fn duration_label(booking: &Booking) -> String {
        format_hours(booking.duration_hours())
    }
}
