//! Tool types for ReactLab
//!
//! This module defines the core types for tool execution, including the `Tool` trait
//! that all tools must implement, and the `ToolContext` struct that provides
//! execution context to tools.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReactError, Result};

/// Trait that all tools must implement.
///
/// Tools are named capabilities the model can request, like reading a file
/// or looking up the OKR guidelines. A tool receives its arguments as a JSON
/// object and returns text that becomes the observation for the model.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use reactlab::tools::{Tool, ToolContext};
/// use reactlab::error::Result;
///
/// struct MyTool;
///
/// #[async_trait]
/// impl Tool for MyTool {
///     fn name(&self) -> &str { "my_tool" }
///     fn description(&self) -> &str { "Does something useful" }
///     fn parameters(&self) -> Value {
///         serde_json::json!({
///             "type": "object",
///             "properties": {},
///             "required": []
///         })
///     }
///     async fn execute(&self, _args: Value, _ctx: &ToolContext) -> Result<String> {
///         Ok("Done!".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    ///
    /// This name is used to identify the tool when the LLM requests it.
    /// It must be unique within a registry.
    fn name(&self) -> &str;

    /// Get the tool description.
    ///
    /// This description is sent to the LLM to help it understand
    /// when and how to use the tool.
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// # Arguments
    /// * `args` - The JSON object of named arguments passed by the LLM
    /// * `ctx` - The execution context (workspace)
    ///
    /// # Returns
    /// The observation text, or an error the agent reports back to the model.
    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String>;
}

/// Context provided to tools during execution.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// The directory relative file paths resolve against
    pub workspace: Option<PathBuf>,
}

impl ToolContext {
    /// Create a new empty tool context.
    ///
    /// # Example
    /// ```
    /// use reactlab::tools::ToolContext;
    ///
    /// let ctx = ToolContext::new();
    /// assert!(ctx.workspace.is_none());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the workspace directory.
    ///
    /// # Example
    /// ```
    /// use reactlab::tools::ToolContext;
    /// use std::path::Path;
    ///
    /// let ctx = ToolContext::new().with_workspace("/home/user/reviews");
    /// assert_eq!(ctx.workspace.as_deref(), Some(Path::new("/home/user/reviews")));
    /// ```
    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Resolve a path argument against the workspace.
    ///
    /// Absolute paths are returned unchanged, as are all paths when no
    /// workspace is set.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        match &self.workspace {
            Some(workspace) if candidate.is_relative() => workspace.join(candidate),
            _ => candidate.to_path_buf(),
        }
    }
}

/// Extract a required string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ReactError::Tool(format!("Missing '{}' argument", key)))
}
