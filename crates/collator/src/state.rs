//! The collator's finite-state accumulator.
//!
//! [`CollatorState`] owns every buffer of one collation run. It is driven one
//! token at a time and never looks ahead: a sentence boundary is recognized
//! only at the moment the token carrying a terminator arrives.

use murmur_config::CollatorConfig;
use murmur_core::{FunctionCall, FunctionFragment, Segment, Token};
use tracing::{debug, trace};

use crate::patterns::{contains_any, ends_with_money, is_possible_list_item};

/// Buffers and flags for a single collation run.
#[derive(Debug, Clone)]
pub struct CollatorState {
    sentence_endings: Vec<String>,
    emit_function: bool,

    /// Text received but not yet emitted
    buffer: String,
    function_name: String,
    function_arguments: String,

    /// The buffer ended in an unterminated dollar amount after the last text token
    ends_with_money: bool,

    emitted: usize,
}

impl CollatorState {
    pub fn new(config: &CollatorConfig) -> Self {
        Self {
            sentence_endings: config.sentence_endings.clone(),
            emit_function: config.emit_function,
            buffer: String::new(),
            function_name: String::new(),
            function_arguments: String::new(),
            ends_with_money: false,
            emitted: 0,
        }
    }

    /// Feed one token, returning the segments it completes (zero, one, or
    /// two: a flush forced by a preceding dollar amount, then the sentence
    /// the token itself terminates).
    pub fn push(&mut self, token: Token) -> Vec<Segment> {
        let mut segments = Vec::new();
        match token {
            Token::Text(text) if text.is_empty() => {
                trace!("Skipping empty text token");
            }
            Token::Text(text) => self.push_text(&text, &mut segments),
            Token::Function(fragment) => self.push_function(fragment),
        }
        segments
    }

    fn push_text(&mut self, token: &str, segments: &mut Vec<Segment>) {
        // "$5" followed by a space: the amount is complete and a new clause begins
        if self.ends_with_money && token.starts_with(' ') {
            segments.extend(self.flush());
        }

        self.buffer.push_str(token);

        let possible_list_item = is_possible_list_item(&self.buffer);
        let trailing_money = ends_with_money(&self.buffer);

        let at_boundary = if possible_list_item {
            token.contains('\n')
        } else {
            contains_any(token, &self.sentence_endings)
        };

        if at_boundary && !trailing_money {
            segments.extend(self.flush());
        }

        self.ends_with_money = trailing_money;
    }

    fn push_function(&mut self, fragment: FunctionFragment) {
        self.function_name.push_str(&fragment.name);
        self.function_arguments.push_str(&fragment.arguments);
    }

    /// Emit the trimmed buffer, if anything is left after trimming, and
    /// reset it.
    fn flush(&mut self) -> Option<Segment> {
        let text = self.buffer.trim();
        let segment = (!text.is_empty()).then(|| Segment::text(text));
        self.buffer.clear();

        if let Some(segment) = &segment {
            self.emitted += 1;
            trace!(segment = ?segment, "Emitting segment");
        }
        segment
    }

    /// Take whatever partial sentence is buffered, e.g. after the upstream
    /// source was cancelled. Function-call buffers are left untouched.
    pub fn take_partial(&mut self) -> Option<Segment> {
        self.ends_with_money = false;
        self.flush()
    }

    /// End the run: flush the remaining buffer, then the aggregated function
    /// call if one was streamed and the caller asked for it.
    pub fn finish(mut self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self.flush().into_iter().collect();

        if !self.function_name.is_empty() && self.emit_function {
            debug!(name = %self.function_name, "Emitting aggregated function call");
            segments.push(Segment::FunctionCall(FunctionCall {
                name: std::mem::take(&mut self.function_name),
                arguments: std::mem::take(&mut self.function_arguments),
            }));
            self.emitted += 1;
        }

        debug!(segments = self.emitted, "Collation finished");
        segments
    }

    /// Whether nothing is buffered.
    pub fn is_idle(&self) -> bool {
        self.buffer.is_empty() && self.function_name.is_empty() && self.function_arguments.is_empty()
    }

    /// Text received but not yet emitted.
    pub fn buffered_text(&self) -> &str {
        &self.buffer
    }
}
