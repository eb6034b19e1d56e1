//! Message types for ReactLab
//!
//! This module defines the core types for conversation history,
//! including messages, roles, and tool calls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single message in a conversation.
///
/// Messages can be from users, assistants, system prompts, or tool results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message (null for tool-call-only assistant turns)
    pub content: Option<String>,
    /// Tool calls made by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// ID of the tool call this message is responding to (for tool results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn with_role(role: Role, content: Option<String>) -> Self {
        Self {
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create a new user message.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::{Message, Role};
    ///
    /// let msg = Message::user("Draft OKRs for my team");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: &str) -> Self {
        Self::with_role(Role::User, Some(content.to_string()))
    }

    /// Create a new assistant message with text content only.
    pub fn assistant(content: &str) -> Self {
        Self::with_role(Role::Assistant, Some(content.to_string()))
    }

    /// Create a new system message.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::{Message, Role};
    ///
    /// let msg = Message::system("You are a helpful HR assistant.");
    /// assert_eq!(msg.role, Role::System);
    /// ```
    pub fn system(content: &str) -> Self {
        Self::with_role(Role::System, Some(content.to_string()))
    }

    /// Create a new tool result message linked to the originating call.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::{Message, Role};
    ///
    /// let msg = Message::tool_result("call_123", "Tool executed successfully");
    /// assert_eq!(msg.role, Role::Tool);
    /// assert_eq!(msg.tool_call_id.as_deref(), Some("call_123"));
    /// ```
    pub fn tool_result(tool_call_id: &str, content: &str) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }

    /// Create an assistant message carrying tool calls.
    ///
    /// Empty `content` is stored as null, matching what chat APIs return for
    /// tool-call-only replies.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::{Message, ToolCall};
    ///
    /// let call = ToolCall::new("call_1", "get_okr_guidelines", "{}");
    /// let msg = Message::assistant_with_tools("", vec![call]);
    /// assert!(msg.has_tool_calls());
    /// assert!(msg.content.is_none());
    /// ```
    pub fn assistant_with_tools(content: &str, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: (!content.is_empty()).then(|| content.to_string()),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Check if this message has tool calls.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Check if this is a tool result message.
    pub fn is_tool_result(&self) -> bool {
        self.role == Role::Tool && self.tool_call_id.is_some()
    }

    /// Content as a string slice, empty when null.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompts and instructions
    System,
    /// Messages from the user
    User,
    /// Messages from the AI assistant
    Assistant,
    /// Results from tool executions
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A tool call made by the assistant, in the wire form the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call within the turn
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// JSON-encoded arguments for the tool
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::ToolCall;
    ///
    /// let call = ToolCall::new("call_123", "read_file", r#"{"file_path": "plan.txt"}"#);
    /// assert_eq!(call.name, "read_file");
    /// ```
    pub fn new(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    /// Decode the JSON-encoded arguments into a [`ToolCallRequest`].
    ///
    /// An empty or whitespace-only argument string decodes to an empty map,
    /// since some backends send `""` for zero-argument functions. Anything
    /// that is not a JSON object is rejected.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::ToolCall;
    ///
    /// let call = ToolCall::new("call_1", "echo", r#"{"text": "hi"}"#);
    /// let request = call.decode().unwrap();
    /// assert_eq!(request.arguments["text"], "hi");
    ///
    /// assert!(ToolCall::new("call_2", "echo", "[1, 2]").decode().is_err());
    /// ```
    pub fn decode(&self) -> Result<ToolCallRequest, ArgumentsError> {
        let arguments = if self.arguments.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&self.arguments) {
                Ok(Value::Object(map)) => map,
                Ok(other) => return Err(ArgumentsError::NotAnObject(json_kind(&other))),
                Err(e) => return Err(ArgumentsError::InvalidJson(e.to_string())),
            }
        };

        Ok(ToolCallRequest {
            id: self.id.clone(),
            name: self.name.clone(),
            arguments,
        })
    }
}

/// A tool call with its arguments decoded and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    /// Named arguments keyed by parameter name
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Arguments as a JSON object value, the shape tools receive.
    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

/// Why a tool call's argument string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentsError {
    InvalidJson(String),
    NotAnObject(&'static str),
}

impl std::fmt::Display for ArgumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentsError::InvalidJson(e) => write!(f, "invalid arguments JSON: {}", e),
            ArgumentsError::NotAnObject(kind) => {
                write!(f, "arguments must be a JSON object, got {}", kind)
            }
        }
    }
}

impl std::error::Error for ArgumentsError {}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content.as_deref(), Some("Hello"));
        assert!(msg.tool_calls.is_empty());
        assert!(msg.tool_call_id.is_none());
    }

    #[test]
    fn test_message_tool_result() {
        let msg = Message::tool_result("call_123", "Success");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.text(), "Success");
        assert_eq!(msg.tool_call_id, Some("call_123".to_string()));
        assert!(msg.is_tool_result());
    }

    #[test]
    fn test_assistant_with_tools_keeps_thought() {
        let call = ToolCall::new("call_1", "search", r#"{"q": "test"}"#);
        let msg = Message::assistant_with_tools("I should check the guidelines", vec![call]);

        assert!(msg.has_tool_calls());
        assert_eq!(msg.text(), "I should check the guidelines");
        assert_eq!(msg.tool_calls[0].name, "search");
    }

    #[test]
    fn test_null_content_text_is_empty() {
        let msg = Message::assistant_with_tools("", vec![ToolCall::new("c", "t", "{}")]);
        assert!(msg.content.is_none());
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert_eq!(Role::Tool.to_string(), "tool");
    }

    #[test]
    fn test_role_serialize() {
        let json = serde_json::to_string(&Role::Tool).unwrap();
        assert_eq!(json, r#""tool""#);
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Tool);
    }

    #[test]
    fn test_decode_object_arguments() {
        let call = ToolCall::new(
            "call_1",
            "save_plan",
            r#"{"file_path": "plan.txt", "content": "O1"}"#,
        );
        let request = call.decode().unwrap();
        assert_eq!(request.id, "call_1");
        assert_eq!(request.name, "save_plan");
        assert_eq!(request.arguments.len(), 2);
        assert_eq!(request.arguments["file_path"], "plan.txt");
    }

    #[test]
    fn test_decode_empty_arguments() {
        let request = ToolCall::new("call_1", "get_okr_guidelines", "").decode().unwrap();
        assert!(request.arguments.is_empty());
        assert_eq!(request.arguments_value(), serde_json::json!({}));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = ToolCall::new("call_1", "echo", "{not json").decode().unwrap_err();
        assert!(matches!(err, ArgumentsError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid arguments JSON"));
    }

    #[test]
    fn test_decode_non_object() {
        let err = ToolCall::new("call_1", "echo", r#""hi""#).decode().unwrap_err();
        assert_eq!(err, ArgumentsError::NotAnObject("string"));
        assert_eq!(
            err.to_string(),
            "arguments must be a JSON object, got string"
        );
    }

    #[test]
    fn test_message_serialization_skips_empty() {
        let json = serde_json::to_string(&Message::user("Hello")).unwrap();
        assert!(!json.contains("tool_calls"));
        assert!(!json.contains("tool_call_id"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Message::user("Hello"));
    }
}
