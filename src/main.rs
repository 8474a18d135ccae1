mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod render;
mod services;
mod store;
mod view_state;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::cmd::view::{self as view_cmd, ViewArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::file_store::FileStore;
use crate::infra::http::HttpTicketSource;
use crate::infra::memory_store::MemoryStore;
use crate::services::KeyValueStore;
use crate::view_state::ViewOptionsStore;
use crate::workflow::board::BoardRequest;

#[derive(Parser)]
#[command(name = "kanban", author, version, about = "Terminal kanban board")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Ticket endpoint (overrides KANBAN_ENDPOINT).
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Directory holding the saved view (overrides KANBAN_STATE_DIR).
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Keep view options in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the tickets and print them grouped into columns.
    Board(BoardArgs),
    /// Inspect or change the saved grouping and sorting.
    View(ViewArgs),
}

#[derive(Args)]
struct BoardArgs {
    /// Column grouping for this run (status, user, priority, team, dueDate).
    #[arg(short, long)]
    group: Option<String>,

    /// Order within a column for this run (priority, title).
    #[arg(short, long)]
    sort: Option<String>,

    /// Remember the grouping and sorting used for this run.
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = AppConfig::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }
    debug!(?config, "configuration loaded");

    let context = build_context(config, cli.ephemeral)?;

    match cli.command {
        Commands::Board(args) => {
            let request = BoardRequest {
                grouping: args.group,
                sorting: args.sort,
                save: args.save,
            };
            cmd::board::run(&context, request).await
        }
        Commands::View(args) => view_cmd::run(&context, args.command),
    }
}

fn build_context(config: AppConfig, ephemeral: bool) -> AppResult<AppContext> {
    let (backing, state_location): (Arc<dyn KeyValueStore>, PathBuf) = if ephemeral {
        (Arc::new(MemoryStore::new()), PathBuf::from("<memory>"))
    } else {
        let file_store = FileStore::in_directory(&config.state_dir);
        let location = file_store.path().to_path_buf();
        (Arc::new(file_store), location)
    };

    let ticket_source = Arc::new(HttpTicketSource::new(config.endpoint.clone(), config.timeout)?);

    Ok(AppContext::new(
        config,
        ticket_source,
        ViewOptionsStore::new(backing),
        state_location,
    ))
}
