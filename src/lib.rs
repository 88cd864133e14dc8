//! Resource query composition and page state for a multi-tenant CRM admin
//! backed by a hosted PostgREST service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `query` turns optional UI inputs into one filter descriptor and encodes
//! it for the wire. `provider` is the data-access seam (`RestProvider` for
//! the hosted backend, `MemoryProvider` in-process). `state` holds list,
//! selection, local-list, cache, and color-mode state. `pages` binds those
//! to each admin screen through an injected `AppContext`.

pub mod config;
pub mod context;
pub mod error;
pub mod pages;
pub mod provider;
pub mod query;
pub mod record;
pub mod resources;
pub mod session;
pub mod state;

pub use context::AppContext;
pub use error::AppError;
pub use record::{Record, RecordId};
