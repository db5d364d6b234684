//! Streaming token collator for Murmur.
//!
//! Turns a live stream of model output tokens into speakable sentence-sized
//! [`Segment`](murmur_core::Segment)s as soon as each sentence completes,
//! plus at most one aggregated function call at the end of the stream.
//!
//! Splitting is a deliberately small heuristic:
//! - a token containing a configured terminator (`.`, `!`, `?`, newline by
//!   default) ends the buffered sentence;
//! - inside a numbered list item (`1. ...`) only a newline does;
//! - a buffer ending in a dollar amount (`$19.`) never splits, and a space
//!   arriving right after one flushes the amount as its own sentence.
//!
//! ```
//! use murmur_collator::collate_iter;
//! use murmur_config::CollatorConfig;
//! use murmur_core::Token;
//!
//! let tokens = ["The price is $", "5", ".", " That's fair."].map(Token::text);
//! let texts: Vec<String> = collate_iter(tokens, &CollatorConfig::default())
//!     .filter_map(|s| s.as_text().map(str::to_string))
//!     .collect();
//! assert_eq!(texts, vec!["The price is $5.", "That's fair."]);
//! ```

pub mod patterns;
pub mod state;
pub mod stream;

pub use patterns::split_at_last_punctuation;
pub use state::CollatorState;
pub use stream::{Collate, CollateIter, TryCollate, collate, collate_iter, try_collate};
