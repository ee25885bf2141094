//! Event persistence.
//!
//! The engine talks to storage only through [`EventStore`]. Two backends ship
//! with the crate: [`MemoryStore`] for tests and embedding, and [`FileStore`]
//! which keeps every event in one JSON document on disk.

mod file;
mod memory;
mod state;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::date_range::DateRange;
use crate::error::StoreResult;
use crate::event::Event;

/// Storage collaborator for events and series.
///
/// Batch inserts are not re-validated; callers validate before writing.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert one event, assigning an id when absent. Returns the id.
    async fn insert(&self, event: Event) -> StoreResult<i64>;

    /// Insert a batch of events, assigning ids.
    async fn insert_many(&self, events: Vec<Event>) -> StoreResult<()>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>>;

    /// All members of a series, in no particular order.
    async fn find_by_series_id(&self, repeat_id: i64) -> StoreResult<Vec<Event>>;

    /// The member of a series with the earliest start date.
    async fn find_one_by_series_id(&self, repeat_id: i64) -> StoreResult<Option<Event>>;

    /// Events starting inside `range`, ordered by start date and time.
    async fn find_in_range(&self, range: DateRange) -> StoreResult<Vec<Event>>;

    /// Replace every field of the stored row with `event.id`.
    async fn update(&self, event: Event) -> StoreResult<()>;

    /// Delete the row with `event.id`; absent rows are ignored.
    async fn delete(&self, event: &Event) -> StoreResult<()>;

    async fn delete_by_series_id(&self, repeat_id: i64) -> StoreResult<()>;

    /// Delete members of a series whose start date is on or after `from`.
    async fn delete_by_series_id_from_date(&self, repeat_id: i64, from: NaiveDate) -> StoreResult<()>;

    /// Allocate a series id that has never been handed out before.
    async fn next_series_id(&self) -> StoreResult<i64>;
}

/// Sort key shared by the backends for range queries.
fn chronological(a: &Event, b: &Event) -> std::cmp::Ordering {
    a.starts_at()
        .cmp(&b.starts_at())
        .then_with(|| a.id.cmp(&b.id))
}

/// Earliest member of a series among `events`.
fn earliest<'a>(events: impl Iterator<Item = &'a Event>) -> Option<&'a Event> {
    events.min_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.cmp(&b.id))
    })
}
