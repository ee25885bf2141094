mod args;
mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planner_core::config::PlannerConfig;
use planner_core::store::FileStore;
use planner_core::{EditScope, SeriesEditor};
use tracing_subscriber::EnvFilter;

use crate::args::{AddArgs, EventArgs};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Manage planner events and recurring series")]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event, or a recurring series when --repeat is given
    Add(AddArgs),
    /// List events grouped by day
    List {
        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one event
    Show {
        id: i64,

        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change an event, or part or all of its series
    Update {
        id: i64,

        /// Which occurrences to change: this, future or all
        #[arg(long, default_value = "this")]
        scope: EditScope,

        #[command(flatten)]
        changes: EventArgs,
    },
    /// Delete an event, or part or all of its series
    Delete {
        id: i64,

        /// Which occurrences to delete: this, future or all
        #[arg(long, default_value = "this")]
        scope: EditScope,
    },
    /// Show config paths and defaults, or change the defaults
    Config {
        /// Color index given to new events
        #[arg(long)]
        default_color: Option<i32>,

        /// Days shown by `planner list` when --to is omitted
        #[arg(long)]
        list_days: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PlannerConfig::load().context("Failed to load planner config")?;
    tracing::debug!(data_dir = %config.data_path().display(), "Opening event store");

    let editor = SeriesEditor::new(FileStore::open(config.data_path()));

    match cli.command {
        Commands::Add(args) => commands::add::run(&editor, args, &config).await,
        Commands::List { from, to, json } => {
            commands::list::run(&editor, from.as_deref(), to.as_deref(), json, &config).await
        }
        Commands::Show { id, json } => commands::show::run(&editor, id, json).await,
        Commands::Update { id, scope, changes } => {
            commands::update::run(&editor, id, scope, changes).await
        }
        Commands::Delete { id, scope } => commands::delete::run(&editor, id, scope).await,
        Commands::Config {
            default_color,
            list_days,
        } => commands::config::run(config, default_color, list_days),
    }
}

/// Log to stderr; RUST_LOG takes precedence over -v flags.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
