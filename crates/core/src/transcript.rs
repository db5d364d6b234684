//! Transcript and event-log domain types.
//!
//! A [`Transcript`] is the causally ordered record of a conversation: what
//! each side said, and which actions the bot started and finished. It is
//! treated as already validated; nothing in Murmur reorders or mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The agent
    Bot,
    /// The person talking to the agent
    Human,
}

/// A spoken or typed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub sender: Sender,

    /// The text content
    pub text: String,

    /// When the message was logged
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Optional metadata (turn ids, interruption markers, etc.)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Create a new human message.
    pub fn human(text: impl Into<String>) -> Self {
        Self::new(Sender::Human, text)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// The bot invoked an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStart {
    /// Name of the action (becomes the function name)
    pub action_type: String,

    /// Structured parameters the action was invoked with
    #[serde(default)]
    pub action_input: serde_json::Value,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ActionStart {
    pub fn new(action_type: impl Into<String>, action_input: serde_json::Value) -> Self {
        Self {
            action_type: action_type.into(),
            action_input,
            timestamp: Utc::now(),
        }
    }
}

/// An action the bot invoked has produced a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionFinish {
    /// Name of the action that finished
    pub action_type: String,

    /// Structured response of the action
    #[serde(default)]
    pub action_output: serde_json::Value,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ActionFinish {
    pub fn new(action_type: impl Into<String>, action_output: serde_json::Value) -> Self {
        Self {
            action_type: action_type.into(),
            action_output,
            timestamp: Utc::now(),
        }
    }
}

/// One entry in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventLog {
    Message(Message),
    ActionStart(ActionStart),
    ActionFinish(ActionFinish),
}

impl EventLog {
    /// The message, if this entry was sent by the bot.
    pub fn as_bot_message(&self) -> Option<&Message> {
        match self {
            Self::Message(message) if message.is_bot() => Some(message),
            _ => None,
        }
    }
}

impl From<Message> for EventLog {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<ActionStart> for EventLog {
    fn from(action: ActionStart) -> Self {
        Self::ActionStart(action)
    }
}

impl From<ActionFinish> for EventLog {
    fn from(action: ActionFinish) -> Self {
        Self::ActionFinish(action)
    }
}

/// An ordered event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub event_logs: Vec<EventLog>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a transcript from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append an entry to the log.
    pub fn push(&mut self, event: impl Into<EventLog>) {
        self.event_logs.push(event.into());
    }

    pub fn len(&self) -> usize {
        self.event_logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_logs.is_empty()
    }
}

impl FromIterator<EventLog> for Transcript {
    fn from_iter<I: IntoIterator<Item = EventLog>>(iter: I) -> Self {
        Self {
            event_logs: iter.into_iter().collect(),
        }
    }
}
