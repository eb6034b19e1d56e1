//! Filesystem tools for ReactLab
//!
//! Reading context documents and saving finished plans. Paths can be either
//! absolute or relative to the workspace in the tool context.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{ReactError, Result};

use super::types::required_str;
use super::{Tool, ToolContext};

/// Tool for reading file contents.
///
/// A missing file is reported to the model as text rather than as a tool
/// failure, so it can decide to create the file instead.
///
/// # Parameters
/// - `file_path`: The path to the file to read (required)
///
/// # Example
/// ```rust
/// use reactlab::tools::{Tool, ToolContext};
/// use reactlab::tools::filesystem::ReadFileTool;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = ReadFileTool;
/// let ctx = ToolContext::new();
/// let result = tool.execute(json!({"file_path": "/no/such/file.txt"}), &ctx).await;
/// assert_eq!(result.unwrap(), "Error: File '/no/such/file.txt' does not exist.");
/// # });
/// ```
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the content of a file. Input: file_path."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file to read"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String> {
        let file_path = required_str(&args, "file_path")?;
        let full_path = ctx.resolve(file_path);

        let read_error = |e: std::io::Error| {
            ReactError::Tool(format!(
                "Error reading file '{}': {}",
                full_path.display(),
                e
            ))
        };

        if !tokio::fs::try_exists(&full_path).await.map_err(read_error)? {
            return Ok(format!("Error: File '{}' does not exist.", file_path));
        }

        tokio::fs::read_to_string(&full_path).await.map_err(read_error)
    }
}

/// Tool for saving text content to a file.
///
/// Creates missing parent directories and overwrites any existing file.
///
/// # Parameters
/// - `file_path`: Where to write the file (required)
/// - `content`: The text to write (required)
pub struct SavePlanTool;

#[async_trait]
impl Tool for SavePlanTool {
    fn name(&self) -> &str {
        "save_plan"
    }

    fn description(&self) -> &str {
        "Save text content to a file. Inputs: file_path, content."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path of the file to save"
                },
                "content": {
                    "type": "string",
                    "description": "The text content to write"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String> {
        let file_path = required_str(&args, "file_path")?;
        let content = required_str(&args, "content")?;
        let full_path = ctx.resolve(file_path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    ReactError::Tool(format!(
                        "Error saving file: failed to create '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| ReactError::Tool(format!("Error saving file: {}", e)))?;

        Ok(format!("Successfully saved content to '{}'.", file_path))
    }
}
