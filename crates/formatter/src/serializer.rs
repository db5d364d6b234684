//! Payload encoding for action inputs and outputs.
//!
//! The formatter does not decide how structured action payloads are
//! rendered inside chat messages; it delegates to a [`PayloadSerializer`].

/// Boxed error returned by a serializer.
pub type SerializeError = Box<dyn std::error::Error + Send + Sync>;

/// Encodes a structured payload as the text a chat model receives.
pub trait PayloadSerializer {
    fn serialize(&self, payload: &serde_json::Value) -> Result<String, SerializeError>;
}

impl<T: PayloadSerializer + ?Sized> PayloadSerializer for &T {
    fn serialize(&self, payload: &serde_json::Value) -> Result<String, SerializeError> {
        (**self).serialize(payload)
    }
}

/// Compact JSON, e.g. `{"city":"NYC"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadSerializer;

impl PayloadSerializer for JsonPayloadSerializer {
    fn serialize(&self, payload: &serde_json::Value) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(payload)?)
    }
}
