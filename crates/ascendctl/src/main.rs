//! Ascend Control - CLI client for the Ascend progression daemon
//!
//! Dungeon and goal commands talk to ascendd over HTTP. The activity
//! calendar lives in a local JSON file.

use anyhow::Result;
use ascend_common::activity::{ActivityStore, CompletionKind};
use ascend_common::{GoalId, VERSION};
use ascendctl::client::{AscendClient, DEFAULT_URL};
use ascendctl::commands;
use chrono::Local;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ascendctl")]
#[command(about = "Ascend - daily dungeons, goal levels and streaks", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// ascendd base URL
    #[arg(long, env = "ASCEND_URL", default_value = DEFAULT_URL, global = true)]
    daemon_url: String,

    /// Directory holding the activity calendar
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show daemon health and version
    Status,

    /// Show today's dungeon
    Dungeon,

    /// Complete a goal and record it on the calendar
    Complete {
        /// Goal ID
        goal_id: i64,
    },

    /// Record a completion on the calendar without the daemon
    Record {
        /// quest, dungeon or custom
        #[arg(long, default_value = "quest")]
        kind: CompletionKind,
    },

    /// Show streaks and the month heatmap
    Streaks {
        /// Month to show (YYYY-MM), defaults to the current one
        #[arg(long)]
        month: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!();
        eprintln!("[ERROR] {}", format!("{:#}", e).red());
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let today = Local::now().date_naive();
    let store = match cli.data_dir {
        Some(dir) => ActivityStore::new(dir),
        None => ActivityStore::default_location(),
    };
    let tracker = commands::tracker_for(store, today);
    let client = AscendClient::new(&cli.daemon_url);

    match cli.command {
        Commands::Status => commands::handle_status(&client).await,
        Commands::Dungeon => commands::handle_dungeon(&client, today).await,
        Commands::Complete { goal_id } => {
            commands::handle_complete(&client, &tracker, GoalId(goal_id), today).await
        }
        Commands::Record { kind } => commands::handle_record(&tracker, kind, today).map(|_| ()),
        Commands::Streaks { month } => commands::handle_streaks(&tracker, month.as_deref(), today),
    }
}
