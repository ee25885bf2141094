use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use planner_core::store::EventStore;
use planner_core::{EditScope, SeriesEditor};

use super::find_event;

pub async fn run<S: EventStore>(editor: &SeriesEditor<S>, id: i64, scope: EditScope) -> Result<()> {
    let event = find_event(editor, id).await?;
    tracing::debug!(id, %scope, repeat_id = ?event.repeat_id, "Deleting event");

    editor
        .delete(&event, scope)
        .await
        .with_context(|| format!("Failed to delete event {}", id))?;

    let what = match (scope, event.repeat_id) {
        (_, None) | (EditScope::This, _) => "event",
        (EditScope::ThisAndFuture, Some(_)) => "this and following occurrences of",
        (EditScope::All, Some(_)) => "every occurrence of",
    };
    println!("{}", format!("  Deleted {} {}", what, event.title).red());

    Ok(())
}
