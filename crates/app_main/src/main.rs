//! PixShelf - image shelf, USD/JPY monitor and todo list
//!
//! Main entry point.

mod browse;
mod monitor;
mod todo;

use anyhow::Result;
use app_core::{AppConfig, AppError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixshelf")]
#[command(about = "Browse image folders, watch USD/JPY and keep a todo list", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive image browser
    Browse {
        /// Directory to open (defaults to the last one opened)
        dir: Option<PathBuf>,
    },

    /// Poll the USD/JPY rate until interrupted
    Monitor(monitor::MonitorArgs),

    /// Manage the todo list
    Todo {
        #[command(subcommand)]
        action: todo::TodoAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook first
    app_log::init().map_err(|e| AppError::Init(e.to_string()))?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("{}; using defaults", e.user_message());
            AppConfig::default()
        }),
    };

    if let Err(e) = app_log::cleanup_old_logs(config.general.log_retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("PixShelf starting...");

    match cli.command {
        Command::Browse { dir } => browse::run(&config, dir).await,
        Command::Monitor(args) => monitor::run(&config, args).await,
        Command::Todo { action } => todo::run(action),
    }
}
