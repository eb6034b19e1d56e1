//! Session module - conversation state for one agent
//!
//! This module provides:
//! - Message, role and tool-call types shared with the providers
//! - [`Conversation`], the append-only history an agent owns
//!
//! History lives for the process only; nothing here touches the disk.
//!
//! # Example
//!
//! ```
//! use reactlab::session::{Conversation, Message, Role};
//!
//! let mut conversation = Conversation::new("You are a helpful HR assistant.");
//! conversation.push(Message::user("Hello!"));
//! conversation.push(Message::assistant("Hi there!"));
//!
//! assert_eq!(conversation.len(), 3);
//! assert_eq!(conversation.last().unwrap().role, Role::Assistant);
//! ```

mod conversation;
pub mod types;

pub use conversation::Conversation;
pub use types::{ArgumentsError, Message, Role, ToolCall, ToolCallRequest};
