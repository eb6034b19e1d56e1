//! Tools module for ReactLab
//!
//! This module provides the tool system, allowing the agent to perform
//! actions on the model's behalf. Tools implement the `Tool` trait and are
//! looked up through a `ToolRegistry`.
//!
//! # Built-in Tools
//!
//! - `ReadFileTool`: Read file contents
//! - `SavePlanTool`: Save text content to a file
//! - `OkrGuidelinesTool`: Return the OKR writing guidelines
//! - `EchoTool`: Simple echo tool for testing
//!
//! # Example
//!
//! ```rust
//! use reactlab::tools::{default_tools, ToolRegistry};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let registry = ToolRegistry::from_tools(default_tools()).unwrap();
//!
//! let result = registry.execute("get_okr_guidelines", json!({})).await;
//! assert!(result.unwrap().contains("Objective"));
//!
//! // Get tool definitions for the LLM
//! assert_eq!(registry.definitions().len(), 3);
//! # });
//! ```

pub mod filesystem;
pub mod okr;
mod registry;
mod types;

pub use registry::ToolRegistry;
pub use types::{Tool, ToolContext};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// The HR assistant's tool set, in the order the model is shown them.
pub fn default_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(filesystem::ReadFileTool),
        Box::new(filesystem::SavePlanTool),
        Box::new(okr::OkrGuidelinesTool),
    ]
}

/// A simple echo tool for testing purposes.
///
/// Returns its `text` argument unchanged. A missing or non-string
/// `text` echoes an empty string.
///
/// # Example
///
/// ```rust
/// use reactlab::tools::{Tool, ToolContext, EchoTool};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = EchoTool;
/// let ctx = ToolContext::new();
/// let result = tool.execute(json!({"text": "Hello"}), &ctx).await;
/// assert_eq!(result.unwrap(), "Hello");
/// # });
/// ```
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes back the provided text"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to echo back"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: Value, _ctx: &ToolContext) -> Result<String> {
        Ok(args
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo_tool() {
        let ctx = ToolContext::new();
        let result = EchoTool.execute(json!({"text": "hi"}), &ctx).await;
        assert_eq!(result.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_echo_tool_missing_text() {
        let ctx = ToolContext::new();
        let result = EchoTool.execute(json!({}), &ctx).await;
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_echo_tool_metadata() {
        assert_eq!(EchoTool.name(), "echo");
        let params = EchoTool.parameters();
        assert_eq!(params["type"], "object");
        assert!(params["properties"]["text"].is_object());
    }

    #[test]
    fn test_default_tools_names() {
        let names: Vec<String> = default_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["read_file", "save_plan", "get_okr_guidelines"]);
    }

    #[test]
    fn test_default_tools_schemas_are_objects() {
        for tool in default_tools() {
            let params = tool.parameters();
            assert_eq!(params["type"], "object", "tool {}", tool.name());
            assert!(params["required"].is_array(), "tool {}", tool.name());
        }
    }
}
