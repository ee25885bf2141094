use anyhow::Result;
use planner_core::SeriesEditor;
use planner_core::store::EventStore;

use super::find_event;
use crate::render::Render;

pub async fn run<S: EventStore>(editor: &SeriesEditor<S>, id: i64, json: bool) -> Result<()> {
    let event = find_event(editor, id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", event.render_details());
    }

    Ok(())
}
