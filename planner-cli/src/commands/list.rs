use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use planner_core::SeriesEditor;
use planner_core::config::PlannerConfig;
use planner_core::date_range::DateRange;
use planner_core::store::EventStore;

use crate::render::{Render, format_date_label};

pub async fn run<S: EventStore>(
    editor: &SeriesEditor<S>,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
    config: &PlannerConfig,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let range = DateRange::from_args(from, to, config.list_days, today)
        .map_err(|e| anyhow::anyhow!(e))?;

    let events = editor.store().find_in_range(range).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Events arrive sorted; print a header whenever the day changes
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        if current_date != Some(event.start_date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(event.start_date, today).bold());
            current_date = Some(event.start_date);
        }

        println!("  {}", event.render());
    }

    Ok(())
}
