use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use planner_core::store::EventStore;
use planner_core::{EditScope, SeriesEditor};

use super::find_event;
use crate::args::EventArgs;

pub async fn run<S: EventStore>(
    editor: &SeriesEditor<S>,
    id: i64,
    scope: EditScope,
    changes: EventArgs,
) -> Result<()> {
    let mut event = find_event(editor, id).await?;
    changes.apply(&mut event)?;
    tracing::debug!(id, %scope, repeat_id = ?event.repeat_id, "Updating event");

    let title = event.title.clone();
    editor
        .update(event, scope)
        .await
        .with_context(|| format!("Failed to update event {} (scope: {})", id, scope))?;

    println!("{}", format!("  Updated: {} ({})", title, scope).yellow());
    Ok(())
}
