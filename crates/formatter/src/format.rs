//! Transcript to chat-message formatting.

use murmur_config::FormatterConfig;
use murmur_core::{ChatMessage, EventLog, FormatError, Sender, Transcript};
use tracing::debug;

use crate::merge::merge_bot_messages;
use crate::serializer::{JsonPayloadSerializer, PayloadSerializer};

/// Format a transcript with the default JSON payload encoding.
///
/// ```
/// use murmur_core::{ChatMessage, Message, Transcript};
/// use murmur_formatter::format_chat_messages;
///
/// let mut transcript = Transcript::new();
/// transcript.push(Message::bot("Hi"));
/// transcript.push(Message::bot("there"));
/// transcript.push(Message::human("hey"));
///
/// let messages = format_chat_messages(&transcript, None).unwrap();
/// assert_eq!(
///     messages,
///     vec![ChatMessage::assistant("Hi there"), ChatMessage::user("hey")]
/// );
/// ```
pub fn format_chat_messages(
    transcript: &Transcript,
    preamble: Option<&str>,
) -> Result<Vec<ChatMessage>, FormatError> {
    let mut formatter = TranscriptFormatter::new();
    if let Some(preamble) = preamble {
        formatter = formatter.with_preamble(preamble);
    }
    formatter.format(transcript)
}

/// Builds chat messages from transcripts.
#[derive(Debug, Clone, Default)]
pub struct TranscriptFormatter<Z = JsonPayloadSerializer> {
    serializer: Z,
    preamble: Option<String>,
}

impl TranscriptFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A JSON formatter using the configured preamble.
    pub fn from_config(config: &FormatterConfig) -> Self {
        Self {
            serializer: JsonPayloadSerializer,
            preamble: config.preamble.clone(),
        }
    }
}

impl<Z: PayloadSerializer> TranscriptFormatter<Z> {
    /// Swap the payload encoding.
    pub fn with_serializer<Y: PayloadSerializer>(self, serializer: Y) -> TranscriptFormatter<Y> {
        TranscriptFormatter {
            serializer,
            preamble: self.preamble,
        }
    }

    /// Set the system prompt emitted before the conversation.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// Flatten a transcript into chat messages.
    ///
    /// An empty preamble is treated as absent. Serializer failures are
    /// returned as-is; nothing is retried or re-encoded.
    pub fn format(&self, transcript: &Transcript) -> Result<Vec<ChatMessage>, FormatError> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);

        if let Some(preamble) = self.preamble.as_deref().filter(|p| !p.is_empty()) {
            messages.push(ChatMessage::system(preamble));
        }

        let merged = merge_bot_messages(&transcript.event_logs);
        for event in &merged {
            messages.push(self.to_chat_message(event)?);
        }

        debug!(
            events = transcript.len(),
            messages = messages.len(),
            "Formatted transcript"
        );
        Ok(messages)
    }

    fn to_chat_message(&self, event: &EventLog) -> Result<ChatMessage, FormatError> {
        let message = match event {
            EventLog::Message(message) => match message.sender {
                Sender::Bot => ChatMessage::assistant(message.text.clone()),
                Sender::Human => ChatMessage::user(message.text.clone()),
            },
            EventLog::ActionStart(action) => ChatMessage::function_call(
                action.action_type.clone(),
                self.encode(&action.action_type, &action.action_input)?,
            ),
            EventLog::ActionFinish(action) => ChatMessage::function_result(
                action.action_type.clone(),
                self.encode(&action.action_type, &action.action_output)?,
            ),
        };
        Ok(message)
    }

    fn encode(&self, action_type: &str, payload: &serde_json::Value) -> Result<String, FormatError> {
        self.serializer
            .serialize(payload)
            .map_err(|e| FormatError::Serialization {
                action_type: action_type.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::SerializeError;
    use murmur_core::{ActionFinish, ActionStart, Message};

    struct FailingSerializer;

    impl PayloadSerializer for FailingSerializer {
        fn serialize(&self, _payload: &serde_json::Value) -> Result<String, SerializeError> {
            Err("payload rejected".into())
        }
    }

    struct PrettySerializer;

    impl PayloadSerializer for PrettySerializer {
        fn serialize(&self, payload: &serde_json::Value) -> Result<String, SerializeError> {
            Ok(serde_json::to_string_pretty(payload)?)
        }
    }

    fn transcript(events: Vec<EventLog>) -> Transcript {
        events.into_iter().collect()
    }

    #[test]
    fn preamble_only() {
        let messages = format_chat_messages(&Transcript::new(), Some("You are helpful.")).unwrap();
        assert_eq!(messages, vec![ChatMessage::system("You are helpful.")]);
    }

    #[test]
    fn empty_preamble_is_skipped() {
        let messages = format_chat_messages(&Transcript::new(), Some("")).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn merges_bot_runs_and_maps_roles() {
        let t = transcript(vec![
            Message::bot("Hi").into(),
            Message::bot("there").into(),
            Message::human("hey").into(),
        ]);
        assert_eq!(
            format_chat_messages(&t, None).unwrap(),
            vec![ChatMessage::assistant("Hi there"), ChatMessage::user("hey")]
        );
    }

    #[test]
    fn actions_become_function_messages() {
        let t = transcript(vec![
            Message::human("Weather in NYC?").into(),
            ActionStart::new("get_weather", serde_json::json!({"city": "NYC"})).into(),
            ActionFinish::new("get_weather", serde_json::json!({"temp": 72})).into(),
            Message::bot("It's 72.").into(),
        ]);
        let messages = format_chat_messages(&t, Some("Be brief.")).unwrap();
        assert_eq!(
            messages,
            vec![
                ChatMessage::system("Be brief."),
                ChatMessage::user("Weather in NYC?"),
                ChatMessage::function_call("get_weather", r#"{"city":"NYC"}"#),
                ChatMessage::function_result("get_weather", r#"{"temp":72}"#),
                ChatMessage::assistant("It's 72."),
            ]
        );
    }

    #[test]
    fn action_events_break_bot_runs() {
        let t = transcript(vec![
            Message::bot("Let me check.").into(),
            ActionStart::new("lookup", serde_json::json!({})).into(),
            Message::bot("Found it.").into(),
        ]);
        let messages = format_chat_messages(&t, None).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::assistant("Let me check."));
        assert_eq!(messages[2], ChatMessage::assistant("Found it."));
    }

    #[test]
    fn no_merge_means_one_to_one_mapping() {
        let t = transcript(vec![
            Message::human("a").into(),
            Message::bot("b").into(),
            Message::human("c").into(),
            Message::bot("d").into(),
        ]);
        let messages = format_chat_messages(&t, None).unwrap();
        assert_eq!(
            messages,
            vec![
                ChatMessage::user("a"),
                ChatMessage::assistant("b"),
                ChatMessage::user("c"),
                ChatMessage::assistant("d"),
            ]
        );
    }

    #[test]
    fn serializer_failure_propagates() {
        let t = transcript(vec![
            Message::human("go").into(),
            ActionStart::new("transfer_call", serde_json::json!({"to": "+1555"})).into(),
        ]);
        let err = TranscriptFormatter::new()
            .with_serializer(FailingSerializer)
            .format(&t)
            .unwrap_err();
        match err {
            FormatError::Serialization {
                action_type,
                reason,
            } => {
                assert_eq!(action_type, "transfer_call");
                assert_eq!(reason, "payload rejected");
            }
        }
    }

    #[test]
    fn serializer_is_injectable() {
        let t = transcript(vec![
            ActionFinish::new("lookup", serde_json::json!({"ok": true})).into(),
        ]);
        let messages = TranscriptFormatter::new()
            .with_serializer(PrettySerializer)
            .format(&t)
            .unwrap();
        assert_eq!(
            messages,
            vec![ChatMessage::function_result("lookup", "{\n  \"ok\": true\n}")]
        );
    }

    #[test]
    fn from_config_uses_preamble() {
        let config = FormatterConfig::default().with_preamble("System rules");
        let formatter = TranscriptFormatter::from_config(&config);
        assert_eq!(formatter.preamble(), Some("System rules"));
        assert_eq!(
            formatter.format(&Transcript::new()).unwrap(),
            vec![ChatMessage::system("System rules")]
        );
    }
}
