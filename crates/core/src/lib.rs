//! # Murmur Core
//!
//! Domain types and error definitions shared by the Murmur collator,
//! formatter, and CLI. This crate has **no runtime dependencies** beyond
//! serialization: it defines the value types that every other crate
//! transforms.
//!
//! ## Layout
//!
//! - [`token`]: what an upstream model stream hands the collator, and what
//!   the collator hands back.
//! - [`transcript`]: the ordered event log of a conversation.
//! - [`chat`]: the role-tagged messages a chat-completion model consumes.
//! - [`error`]: the error taxonomy.

pub mod chat;
pub mod error;
pub mod token;
pub mod transcript;

// Re-export key types at crate root for ergonomics
pub use chat::{ChatFunctionCall, ChatMessage, ChatRole};
pub use error::{Error, FormatError, Result};
pub use token::{FunctionCall, FunctionFragment, Segment, Token};
pub use transcript::{ActionFinish, ActionStart, EventLog, Message, Sender, Transcript};
