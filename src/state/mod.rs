//! Client-side state shared by the page controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `list` drives backend-sourced lists, `local` holds lists edited in
//! memory, `cache` backs related-record lookups and optimistic writes.
//! `selection` and `theme` are presentation state with no backend side.

pub mod cache;
pub mod list;
pub mod local;
pub mod selection;
pub mod theme;

pub use cache::{Lookup, PendingWrite, RecordCache};
pub use list::{FetchOutcome, FetchTicket, ListQuery, QueryState};
pub use local::{IdsExhausted, LocalId, LocalList};
pub use selection::Selection;
pub use theme::ColorMode;
