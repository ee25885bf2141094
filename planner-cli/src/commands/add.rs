use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::config::PlannerConfig;
use planner_core::store::EventStore;
use planner_core::{Created, SeriesEditor};

use crate::args::AddArgs;
use crate::render::pluralize;

pub async fn run<S: EventStore>(
    editor: &SeriesEditor<S>,
    args: AddArgs,
    config: &PlannerConfig,
) -> Result<()> {
    let event = args.into_event(config.default_color)?;
    let title = event.title.clone();

    match editor.create(event).await? {
        Created::Single(id) => {
            println!("{}", format!("  Created: {} (#{})", title, id).green());
        }
        Created::Series {
            repeat_id,
            occurrences: 0,
        } => {
            println!(
                "{}",
                format!("  Series {} for {} ends before it starts; nothing added", repeat_id, title)
                    .yellow()
            );
        }
        Created::Series {
            repeat_id,
            occurrences,
        } => {
            println!(
                "{}",
                format!(
                    "  Created: {} ({} {}, series {})",
                    title,
                    occurrences,
                    pluralize("occurrence", occurrences),
                    repeat_id
                )
                .green()
            );
        }
    }

    Ok(())
}
