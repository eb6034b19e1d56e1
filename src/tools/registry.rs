//! Tool registry for ReactLab
//!
//! This module provides the `ToolRegistry` struct for looking up and executing
//! tools by name. A registry is built once from a list of tools and never
//! changes afterwards.

use std::collections::HashMap;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{ReactError, Result};
use crate::providers::ToolDefinition;

use super::{Tool, ToolContext};

/// A registry that holds tools keyed by their unique name.
///
/// Definitions and names are reported in registration order, which is the
/// order the model sees the tools in.
///
/// # Example
///
/// ```rust
/// use reactlab::tools::{ToolRegistry, EchoTool};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
///
/// assert!(registry.has("echo"));
///
/// let result = registry.execute("echo", json!({"text": "hello"})).await;
/// assert_eq!(result.unwrap(), "hello");
/// # });
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Build a registry from a non-empty list of uniquely named tools.
    ///
    /// # Errors
    /// `ReactError::Config` if the list is empty or two tools share a name.
    ///
    /// # Example
    /// ```
    /// use reactlab::tools::{ToolRegistry, EchoTool};
    ///
    /// let err = ToolRegistry::from_tools(vec![Box::new(EchoTool), Box::new(EchoTool)]);
    /// assert!(err.is_err());
    /// ```
    pub fn from_tools(tools: Vec<Box<dyn Tool>>) -> Result<Self> {
        if tools.is_empty() {
            return Err(ReactError::Config(
                "At least one tool must be registered".to_string(),
            ));
        }

        let mut registry = Self {
            tools: HashMap::with_capacity(tools.len()),
            order: Vec::with_capacity(tools.len()),
        };

        for tool in tools {
            let name = tool.name().to_string();
            if registry.tools.contains_key(&name) {
                return Err(ReactError::Config(format!(
                    "Duplicate tool name: {}",
                    name
                )));
            }
            debug!(tool = %name, "Registering tool");
            registry.order.push(name.clone());
            registry.tools.insert(name, tool);
        }

        Ok(registry)
    }

    /// Get a tool by name.
    ///
    /// # Example
    /// ```
    /// use reactlab::tools::{ToolRegistry, EchoTool};
    ///
    /// let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
    /// assert_eq!(registry.get("echo").unwrap().name(), "echo");
    /// assert!(registry.get("nonexistent").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Execute a tool by name with default context.
    pub async fn execute(&self, name: &str, args: Value) -> Result<String> {
        self.execute_with_context(name, args, &ToolContext::default())
            .await
    }

    /// Execute a tool by name with a specific context.
    ///
    /// # Errors
    /// `ReactError::Tool` if no tool has that name, or whatever the tool
    /// itself returns.
    pub async fn execute_with_context(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ReactError::Tool(format!("Tool not found: {}", name)))?;

        let start = Instant::now();

        match tool.execute(args, ctx).await {
            Ok(output) => {
                info!(
                    tool = name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool executed successfully"
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool execution failed"
                );
                Err(e)
            }
        }
    }

    /// Get all tool definitions for use with LLM providers, in registration order.
    ///
    /// # Example
    /// ```
    /// use reactlab::tools::{ToolRegistry, EchoTool};
    ///
    /// let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
    /// let definitions = registry.definitions();
    /// assert_eq!(definitions.len(), 1);
    /// assert_eq!(definitions[0].name, "echo");
    /// ```
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Names of all registered tools, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Iterate over the tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).map(|t| t.as_ref()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Always false for a registry built by `from_tools`.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{default_tools, EchoTool};
    use serde_json::json;

    #[test]
    fn test_registry_from_tools() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();

        assert!(registry.has("echo"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_rejects_empty() {
        let err = ToolRegistry::from_tools(vec![]).unwrap_err();
        assert!(matches!(err, ReactError::Config(_)));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let err = ToolRegistry::from_tools(vec![Box::new(EchoTool), Box::new(EchoTool)])
            .unwrap_err();
        assert!(matches!(err, ReactError::Config(ref msg) if msg.contains("echo")));
    }

    #[test]
    fn test_registry_get() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();

        assert_eq!(registry.get("echo").unwrap().name(), "echo");
        assert!(registry.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_registry_execute() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();

        let result = registry.execute("echo", json!({"text": "hello"})).await;
        assert_eq!(result.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_registry_execute_with_context() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
        let ctx = ToolContext::new().with_workspace("/tmp/test");

        let result = registry
            .execute_with_context("echo", json!({"text": "world"}), &ctx)
            .await;
        assert_eq!(result.unwrap(), "world");
    }

    #[tokio::test]
    async fn test_tool_not_found() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
        let err = registry.execute("nonexistent", json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Tool not found: nonexistent"));
    }

    #[test]
    fn test_definitions_follow_registration_order() {
        let registry = ToolRegistry::from_tools(default_tools()).unwrap();

        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["read_file", "save_plan", "get_okr_guidelines"]);
        assert_eq!(
            registry.names(),
            vec!["read_file", "save_plan", "get_okr_guidelines"]
        );
    }

    #[test]
    fn test_definitions_carry_schema() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
        let definitions = registry.definitions();
        assert_eq!(definitions[0].description, "Echoes back the provided text");
        assert!(definitions[0].parameters.is_object());
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = ToolRegistry::from_tools(vec![Box::new(EchoTool)]).unwrap();
        assert!(format!("{:?}", registry).contains("echo"));
    }
}
