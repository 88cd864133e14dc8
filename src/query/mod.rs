//! Query building for list endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `descriptor` defines the filter/sort/page shapes, `compose` turns page
//! inputs into a descriptor, `postgrest` encodes descriptors for the hosted
//! backend, and `eval` applies them in-process for the memory provider.

pub mod compose;
pub mod descriptor;
pub mod eval;
pub mod postgrest;

pub use compose::{FilterComposer, Precedence, QueryInputs};
pub use descriptor::{
    DEFAULT_PAGE_SIZE, DateCondition, FilterDescriptor, Operator, Pagination, Predicate, Sort, SortOrder,
};
