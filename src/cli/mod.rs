//! CLI module - command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod agent;
pub mod common;
pub mod config;
pub mod tools;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reactlab")]
#[command(version)]
#[command(about = "Performance review assistant built on a manual ReAct loop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive assistant
    Agent {
        /// Direct message to process (non-interactive mode)
        #[arg(short, long)]
        message: Option<String>,
        /// Do not print the step-by-step trace
        #[arg(short, long)]
        quiet: bool,
        /// Override the number of model rounds per turn
        #[arg(long, value_name = "N")]
        max_iterations: Option<usize>,
    },
    /// List the built-in tools
    Tools {
        /// Print the tool definitions sent to the model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (API key masked)
    Show,
    /// Check configuration for errors and warnings
    Check,
    /// Print the config file location
    Path,
}

/// Entry point for the CLI - called from main().
pub async fn run() -> Result<()> {
    // .env first, so both the config and the logger see it
    let _ = dotenvy::dotenv();

    // Fall back to defaults if the config file is missing or unreadable;
    // the commands report the actual problem.
    let logging_cfg = reactlab::config::Config::load()
        .map(|c| c.logging)
        .unwrap_or_default();
    reactlab::utils::logging::init_logging(&logging_cfg);

    let cli = Cli::parse();

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Version) => {
            cmd_version();
        }
        Some(Commands::Agent {
            message,
            quiet,
            max_iterations,
        }) => {
            agent::cmd_agent(message, quiet, max_iterations).await?;
        }
        Some(Commands::Tools { json }) => {
            tools::cmd_tools(json)?;
        }
        Some(Commands::Config { action }) => {
            config::cmd_config(action)?;
        }
    }

    Ok(())
}

/// Display version information
fn cmd_version() {
    println!("reactlab {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Performance Review Assistant - ReAct Agent Lab");
}
