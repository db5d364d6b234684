//! Transcript formatter for Murmur.
//!
//! Folds an ordered conversation [`Transcript`](murmur_core::Transcript)
//! into the role-tagged [`ChatMessage`](murmur_core::ChatMessage) list a
//! chat-completion model expects:
//!
//! 1. the optional preamble becomes a leading `system` message;
//! 2. consecutive bot messages are merged into one `assistant` message;
//! 3. human messages become `user` messages, action starts become
//!    `assistant` function calls, and action results become `function`
//!    messages, with payloads encoded by a [`PayloadSerializer`].

pub mod format;
pub mod merge;
pub mod serializer;

pub use format::{TranscriptFormatter, format_chat_messages};
pub use merge::merge_bot_messages;
pub use serializer::{JsonPayloadSerializer, PayloadSerializer, SerializeError};
