//! Agent command handler (interactive + single message).

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use reactlab::agent::AgentLoop;
use reactlab::config::Config;

use super::common::create_agent;

const SEPARATOR_WIDTH: usize = 50;

/// Interactive or single-message agent mode.
pub(crate) async fn cmd_agent(
    message: Option<String>,
    quiet: bool,
    max_iterations: Option<usize>,
) -> Result<()> {
    let mut config = Config::load().with_context(|| "Failed to load configuration")?;
    if quiet {
        config.agent.verbose = false;
    }
    if let Some(n) = max_iterations {
        config.agent.max_iterations = n;
    }

    if let Some(msg) = message {
        let mut agent = init_agent(&config);
        match agent.submit_turn(&msg).await {
            Ok(outcome) => {
                println!("{}", outcome);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("Performance Review Assistant");
    println!("Practical AI Corp - ReAct Agent Lab");
    println!("Type 'exit' to quit");
    println!();
    println!("Initializing Agent...");
    let mut agent = init_agent(&config);
    println!("Agent Ready!");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF
            println!();
            break;
        }

        let input = input.trim();
        if is_exit_command(input) {
            println!("Goodbye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        println!();
        println!("Agent is thinking...");

        match agent.submit_turn(input).await {
            Ok(outcome) => {
                println!();
                println!("Assistant:");
                println!("{}", outcome);
                println!();
                println!("{}", "-".repeat(SEPARATOR_WIDTH));
                println!();
            }
            Err(e) => {
                eprintln!("An error occurred: {}", e);
            }
        }
    }

    Ok(())
}

/// Build the agent or exit with the reason.
fn init_agent(config: &Config) -> AgentLoop {
    match create_agent(config) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error initializing agent: {}", e);
            std::process::exit(1);
        }
    }
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}
