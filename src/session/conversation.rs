//! Append-only conversation history owned by one agent.

use chrono::{DateTime, Utc};

use super::types::{Message, Role, ToolCall};

/// Ordered conversation history for a single agent session.
///
/// A conversation always starts with exactly one system message and only
/// ever grows: there is no way to remove, reorder or rewrite a message once
/// it has been pushed. It lives for the process only.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
}

impl Conversation {
    /// Start a conversation with the given system prompt.
    ///
    /// # Example
    /// ```
    /// use reactlab::session::{Conversation, Role};
    ///
    /// let conversation = Conversation::new("You are a helpful HR assistant.");
    /// assert_eq!(conversation.len(), 1);
    /// assert_eq!(conversation.messages()[0].role, Role::System);
    /// ```
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            created_at: Utc::now(),
        }
    }

    /// Append a message to the end of the history.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the system message is present from construction.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Messages with the given role, in order.
    pub fn messages_by_role(&self, role: Role) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.role == role).collect()
    }

    /// Check that every tool message answers a call made by the nearest
    /// preceding assistant message.
    ///
    /// Returns a description of the first broken link, if any.
    pub fn validate_tool_links(&self) -> std::result::Result<(), String> {
        let mut open_calls: Option<&[ToolCall]> = None;

        for (index, message) in self.messages.iter().enumerate() {
            match message.role {
                Role::Assistant => open_calls = Some(message.tool_calls.as_slice()),
                Role::Tool => {
                    let id = message
                        .tool_call_id
                        .as_deref()
                        .ok_or_else(|| format!("tool message {} has no tool_call_id", index))?;
                    let answered = open_calls
                        .map(|calls| calls.iter().any(|c| c.id == id))
                        .unwrap_or(false);
                    if !answered {
                        return Err(format!(
                            "tool message {} references unknown call '{}'",
                            index, id
                        ));
                    }
                }
                Role::System | Role::User => open_calls = None,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_system_message() {
        let conversation = Conversation::new("Be brief");
        assert_eq!(conversation.len(), 1);
        assert!(!conversation.is_empty());
        assert_eq!(conversation.messages()[0].role, Role::System);
        assert_eq!(conversation.messages()[0].text(), "Be brief");
        assert!(conversation.created_at() <= Utc::now());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut conversation = Conversation::new("sys");
        conversation.push(Message::user("first"));
        conversation.push(Message::assistant("second"));

        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.last().unwrap().text(), "second");
        assert_eq!(conversation.messages_by_role(Role::User).len(), 1);
    }

    #[test]
    fn test_validate_tool_links_ok() {
        let mut conversation = Conversation::new("sys");
        conversation.push(Message::user("go"));
        conversation.push(Message::assistant_with_tools(
            "",
            vec![
                ToolCall::new("call_a", "echo", "{}"),
                ToolCall::new("call_b", "echo", "{}"),
            ],
        ));
        conversation.push(Message::tool_result("call_a", "a"));
        conversation.push(Message::tool_result("call_b", "b"));
        conversation.push(Message::assistant("done"));

        assert!(conversation.validate_tool_links().is_ok());
    }

    #[test]
    fn test_validate_tool_links_unknown_id() {
        let mut conversation = Conversation::new("sys");
        conversation.push(Message::assistant_with_tools(
            "",
            vec![ToolCall::new("call_a", "echo", "{}")],
        ));
        conversation.push(Message::tool_result("call_zzz", "a"));

        let err = conversation.validate_tool_links().unwrap_err();
        assert!(err.contains("call_zzz"));
    }

    #[test]
    fn test_validate_tool_links_after_user_message() {
        let mut conversation = Conversation::new("sys");
        conversation.push(Message::assistant_with_tools(
            "",
            vec![ToolCall::new("call_a", "echo", "{}")],
        ));
        conversation.push(Message::user("interrupt"));
        conversation.push(Message::tool_result("call_a", "late"));

        assert!(conversation.validate_tool_links().is_err());
    }
}
