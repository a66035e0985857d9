//! Job board CLI
//!
//! Browses openings from the recruiting API. Filters live in the query string
//! of the location being viewed, so any location printed by the board can be
//! passed back to `open` or `browse` to get the same view.

use board::session;
use board::{Config, JobBoard, LoadState, Location, Route};
use clap::{Parser, ValueEnum};
use client::JobsClient;
use common::FilterSet;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "job-board")]
#[command(version)]
#[command(about = "Browse and filter job openings")]
#[command(propagate_version = true)]
struct Args {
    /// Recruiting API base URL (overrides JOBS_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request timeout in seconds (overrides JOBS_REQUEST_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List jobs matching the given filters
    List(ListArgs),

    /// Show one job
    Show {
        /// Job id
        id: String,

        /// Output format
        #[arg(long, short = 'o', default_value = "text")]
        output: OutputFormat,
    },

    /// Render the view at a location, e.g. "/jobs?department=IT" or "/jobs/42"
    Open {
        /// Path with query string, or a full URL
        location: String,
    },

    /// Browse interactively, starting at a location
    Browse {
        /// Path with query string, or a full URL
        #[arg(default_value = "/jobs")]
        location: String,
    },
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Department (IT, Management, HR, CX, Development)
    #[arg(long)]
    department: Option<String>,

    /// Location (Panjim, Verna, Madgaon, Colvale, Canca, Parra, Mapusa)
    #[arg(long)]
    location: Option<String>,

    /// Function (Development, Consulting, Meetings, Conference)
    #[arg(long)]
    function: Option<String>,

    /// Any other filter, forwarded to the API as-is (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    filters: Vec<(String, String)>,

    /// Output format
    #[arg(long, short = 'o', default_value = "text")]
    output: OutputFormat,
}

impl ListArgs {
    fn filter_set(&self) -> FilterSet {
        let named = [
            ("search", &self.search),
            ("department", &self.department),
            ("location", &self.location),
            ("function", &self.function),
        ];
        let mut filters: FilterSet = self.filters.iter().cloned().collect();
        for (key, value) in named {
            if let Some(value) = value {
                filters.set(key, value.as_str());
            }
        }
        filters
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The rendered view goes to stdout, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?.with_overrides(args.api_base.as_deref(), args.timeout)?;
    tracing::debug!(api_base = %config.api_base, timeout = ?config.request_timeout, "Configuration loaded");

    let client = JobsClient::new(&config.api_base, config.request_timeout)?;

    match args.command {
        Commands::List(list) => {
            let location = board::router::list_location(&list.filter_set());
            run_once(client, location, list.output).await
        }
        Commands::Show { id, output } => {
            let location = board::router::detail_location(&id, &FilterSet::new());
            run_once(client, location, output).await
        }
        Commands::Open { location } => {
            run_once(client, Location::parse(&location), OutputFormat::Text).await
        }
        Commands::Browse { location } => {
            let mut board = JobBoard::new(client, Location::parse(&location));
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            println!("{}", session::HELP);
            session::run(&mut board, stdin, &mut stdout).await?;
            Ok(())
        }
    }
}

/// Loads the view at `location` once and prints it.
async fn run_once(
    client: JobsClient,
    location: Location,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = JobBoard::new(client, location);
    board.settle().await;

    let failure = match board.route() {
        Route::List => failed(board.jobs()),
        Route::Detail(_) => failed(board.detail()),
    };
    if let Some(msg) = failure {
        return Err(msg.into());
    }

    match output {
        OutputFormat::Text => print!("{}", board.render()),
        OutputFormat::Json => {
            let json = match board.route() {
                Route::List => serde_json::to_string_pretty(&board.jobs().loaded())?,
                Route::Detail(_) => serde_json::to_string_pretty(&board.detail().loaded())?,
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn failed<T>(state: &LoadState<T>) -> Option<String> {
    match state {
        LoadState::Failed(msg) => Some(msg.clone()),
        _ => None,
    }
}
