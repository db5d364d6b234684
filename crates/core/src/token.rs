//! Stream token and segment types.
//!
//! An upstream adapter turns a provider's streaming response into a sequence
//! of [`Token`]s. The collator folds those into [`Segment`]s: speakable text
//! units and, at most once, an aggregated [`FunctionCall`].

use serde::{Deserialize, Serialize};

/// A partial piece of a function invocation, as streamed by the model.
///
/// Either field may be empty; both are concatenated across the whole stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFragment {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub arguments: String,
}

impl FunctionFragment {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// One unit of incremental model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// A fragment of natural-language output.
    Text(String),

    /// A fragment of a function/tool invocation.
    Function(FunctionFragment),
}

impl Token {
    /// Create a text token.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a function-fragment token.
    pub fn function(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::Function(FunctionFragment::new(name, arguments))
    }

    /// Whether this is a text token with no characters.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<FunctionFragment> for Token {
    fn from(fragment: FunctionFragment) -> Self {
        Self::Function(fragment)
    }
}

/// A function call aggregated from every fragment in a stream.
///
/// `arguments` is passed through verbatim; whether it is well-formed JSON is
/// the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// One finalized unit of collator output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A trimmed, non-empty sentence-like unit.
    Text { text: String },

    /// The aggregated function call; always the last segment of a run.
    FunctionCall(FunctionCall),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The text of a text segment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::FunctionCall(_) => None,
        }
    }

    /// The function call of a function-call segment.
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::Text { .. } => None,
            Self::FunctionCall(call) => Some(call),
        }
    }
}
