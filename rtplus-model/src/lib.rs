//! RT+ rows for editable tables
//!
//! Row types for personnel, team memberships and skill checks, a dynamic
//! field-map [`Record`](model::Record), the validation run before an edit is
//! saved, and an optimistic row cache that wires table callbacks to remote
//! mutations with rollback on failure.

pub mod cache;
pub mod error;
pub mod model;
pub mod validate;

pub use cache::{OptimisticCache, RowSink, Snapshot};
pub use validate::Validate;
