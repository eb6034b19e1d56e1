//! Tools CLI command handler - lists what the assistant can call.

use anyhow::{Context, Result};

use reactlab::tools::{default_tools, ToolRegistry};

/// List the built-in tools, or print their definitions as JSON.
pub(crate) fn cmd_tools(json: bool) -> Result<()> {
    let registry = ToolRegistry::from_tools(default_tools())?;

    if json {
        let definitions = serde_json::to_string_pretty(&registry.definitions())
            .context("Failed to serialize tool definitions")?;
        println!("{}", definitions);
        return Ok(());
    }

    println!("Built-in tools:");
    println!();
    let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for tool in registry.iter() {
        println!("  {:<width$}  {}", tool.name(), tool.description(), width = width);
    }
    Ok(())
}
