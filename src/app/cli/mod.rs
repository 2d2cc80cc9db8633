//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api;
use crate::app::commands::output::write_output;
use crate::domain::AppError;

/// Environment variable GitHub Actions sets to the webhook payload path.
const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

#[derive(Parser)]
#[command(name = "pr-notifier")]
#[command(version)]
#[command(
    about = "Mirror pull request review progress into a Slack channel",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one pull request webhook event
    #[clap(visible_alias = "h")]
    Handle {
        /// Path to the webhook payload JSON
        #[arg(short = 'e', long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<PathBuf>,
        /// Optional TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the chat message an event would produce, without calling any host
    #[clap(visible_alias = "p")]
    Preview {
        /// Path to the webhook payload JSON
        #[arg(short = 'e', long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<PathBuf>,
        /// Optional TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Approval count to render
        #[arg(short, long, default_value_t = 0)]
        approvals: u32,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Handle { event_path, config } => run_handle(event_path, config),
        Commands::Preview { event_path, config, approvals } => {
            run_preview(event_path, config, approvals)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries the JSON result.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_handle(event_path: Option<PathBuf>, config: Option<PathBuf>) -> Result<(), AppError> {
    // Configuration is checked before the event is read.
    let config = api::load_config(config.as_deref())?;
    let event_path = require_event_path(event_path)?;
    let event = api::read_event(&event_path)?;

    let output = api::handle_event(&config, &event)?;
    write_output(&output)
}

fn run_preview(
    event_path: Option<PathBuf>,
    config: Option<PathBuf>,
    approvals: u32,
) -> Result<(), AppError> {
    let settings = api::load_settings(config.as_deref())?;
    let event_path = require_event_path(event_path)?;
    let event = api::read_event(&event_path)?;

    let output = api::preview(&settings, &event, approvals)?;
    write_output(&output)
}

fn require_event_path(event_path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    event_path.ok_or_else(|| {
        AppError::config_error(format!("No event payload: pass --event-path or set {}", GITHUB_EVENT_PATH))
    })
}
