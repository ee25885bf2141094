pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

use anyhow::Result;
use planner_core::store::EventStore;
use planner_core::{Event, SeriesEditor};

/// Load a stored event by id or fail with a user-facing message.
pub async fn find_event<S: EventStore>(editor: &SeriesEditor<S>, id: i64) -> Result<Event> {
    match editor.store().find_by_id(id).await? {
        Some(event) => Ok(event),
        None => anyhow::bail!("Event {} not found. Use `planner list` to see event ids.", id),
    }
}
