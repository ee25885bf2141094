use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use planner_core::config::PlannerConfig;

/// Show config paths and values, persisting any given changes first.
pub fn run(
    mut config: PlannerConfig,
    default_color: Option<i32>,
    list_days: Option<u64>,
) -> Result<()> {
    let config_path = PlannerConfig::config_path()?;

    if default_color.is_some() || list_days.is_some() {
        if let Some(color) = default_color {
            config.default_color = color;
        }
        if let Some(days) = list_days {
            config.list_days = days;
        }
        config
            .save(&config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "Saved config");
        println!("{}", "  Config updated".green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.data_path().join("events.json").display());
    println!("{}", "Defaults".bold());
    println!("  Color:      {}", config.default_color);
    println!("  List days:  {}", config.list_days);

    Ok(())
}
