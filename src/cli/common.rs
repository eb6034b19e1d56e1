//! Shared helpers for CLI commands.

use reactlab::agent::{AgentLoop, TraceEvent};
use reactlab::config::Config;
use reactlab::providers::create_provider;
use reactlab::tools::default_tools;

/// Build the HR assistant agent from configuration.
///
/// In verbose mode each trace line goes to stderr as soon as it happens.
pub(crate) fn create_agent(config: &Config) -> reactlab::Result<AgentLoop> {
    let settings = config.resolve_llm()?;
    let provider = create_provider(&settings)?;

    AgentLoop::builder(provider)
        .tools(default_tools())
        .system_prompt(config.system_prompt())
        .max_iterations(config.agent.max_iterations)
        .verbose(config.agent.verbose)
        .chat_options(config.chat_options())
        .workspace(config.agent.workspace.as_str())
        .on_trace(print_trace_event)
        .build()
}

fn print_trace_event(event: &TraceEvent) {
    if let TraceEvent::Step { iteration } = event {
        if *iteration > 1 {
            eprintln!();
        }
    }
    eprintln!("{}", event);
}
