//! Error types for the Murmur domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. The collator has none:
//! malformed token streams degrade to a best-effort flush instead of failing.

use thiserror::Error;

/// The top-level error type for all Murmur operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Formatter errors ---
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum FormatError {
    #[error("Failed to serialize payload for action {action_type}: {reason}")]
    Serialization { action_type: String, reason: String },
}
