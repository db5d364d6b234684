//! Chat-completion message types.
//!
//! These are the role-tagged entries a conversational model consumes. They
//! serialize to the familiar `{"role": ..., "content": ...}` wire shape,
//! including the legacy `function_call` / `function` role pair used for
//! action invocations and results.

use serde::{Deserialize, Serialize};

/// The role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions (the preamble)
    System,
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// A function (action) result
    Function,
}

/// A function invocation embedded in an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFunctionCall {
    /// Name of the function to invoke
    pub name: String,

    /// Arguments, already encoded as text
    pub arguments: String,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    /// `content` is `None` (serialized as `null`) when the message carries a
    /// function call instead of text.
    Assistant {
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        function_call: Option<ChatFunctionCall>,
    },
    Function {
        name: String,
        content: String,
    },
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create an assistant text message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: Some(content.into()),
            function_call: None,
        }
    }

    /// Create an assistant message that invokes a function.
    pub fn function_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::Assistant {
            content: None,
            function_call: Some(ChatFunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }

    /// Create a function result message.
    pub fn function_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> ChatRole {
        match self {
            Self::System { .. } => ChatRole::System,
            Self::User { .. } => ChatRole::User,
            Self::Assistant { .. } => ChatRole::Assistant,
            Self::Function { .. } => ChatRole::Function,
        }
    }

    /// The text content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::System { content } | Self::User { content } | Self::Function { content, .. } => {
                Some(content)
            }
            Self::Assistant { content, .. } => content.as_deref(),
        }
    }
}
