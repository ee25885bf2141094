//! Core engine for the planner's calendar.
//!
//! This crate turns recurrence templates into concrete events and applies
//! edits and deletions scoped to one occurrence, an occurrence and its
//! successors, or a whole series:
//! - `validate` checks event invariants before anything is written
//! - `recurrence` expands templates into occurrences
//! - `series` resolves scoped updates and deletions against an `EventStore`

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod recurrence;
pub mod series;
pub mod store;
pub mod validate;

pub use error::{PlannerError, PlannerResult, StoreError, ValidationError};
pub use event::{Event, Repeat};
pub use series::{Created, EditScope, SeriesEditor};
