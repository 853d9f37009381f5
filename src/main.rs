mod commands;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda-cli")]
#[command(about = "Query and maintain a JSON agenda of (recurring) events")]
struct Cli {
    /// Path to the JSON event store
    #[arg(long, global = true, default_value = "events.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the occurrences intersecting a window
    Events {
        /// Window start (ISO-8601, inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Window end (ISO-8601, exclusive)
        #[arg(long)]
        end: Option<String>,
    },
    /// List upcoming alarms around now, sorted and capped
    Alarms {
        /// Look-ahead in minutes
        #[arg(long, default_value_t = 1440)]
        within: i64,

        /// Look-back in minutes (catches alarms that just fired)
        #[arg(long, default_value_t = 5)]
        grace: i64,

        /// Maximum number of results
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Add a new event to the store
    New {
        title: String,

        /// Start date/time (e.g. "2025-03-20T15:00")
        #[arg(short, long)]
        start: String,

        /// Optional end date/time
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        all_day: bool,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        assignee: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Recurrence rule as JSON, e.g. '{"freq": "WEEKLY", "byweekday": [0]}'
        #[arg(long)]
        rrule: Option<String>,
    },
    /// Mark an occurrence (or a whole one-off event) completed
    Complete {
        /// Plain event id, or composite "<event_id>:<occurrence_iso>"
        occurrence_id: String,

        /// Un-mark instead
        #[arg(long)]
        undo: bool,
    },
    /// Skip one occurrence of a recurring series
    Skip {
        /// Composite "<event_id>:<occurrence_iso>"
        occurrence_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Events { start, end } => {
            commands::events::run(&cli.file, start.as_deref(), end.as_deref())
        }
        Commands::Alarms {
            within,
            grace,
            limit,
        } => commands::alarms::run(&cli.file, within, grace, limit),
        Commands::New {
            title,
            start,
            end,
            all_day,
            location,
            assignee,
            description,
            rrule,
        } => commands::new::run(
            &cli.file,
            commands::new::NewEvent {
                title,
                start,
                end,
                all_day,
                location,
                assignee,
                description,
                rrule,
            },
        ),
        Commands::Complete {
            occurrence_id,
            undo,
        } => commands::complete::run(&cli.file, &occurrence_id, undo),
        Commands::Skip { occurrence_id } => commands::skip::run(&cli.file, &occurrence_id),
    }
}
