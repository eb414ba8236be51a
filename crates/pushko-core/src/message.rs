//! Event payloads.
//!
//! Event data and channel data are either pre-encoded strings, passed
//! through untouched, or structured JSON values that are encoded on send.

use serde::{Deserialize, Serialize};

/// Data attached to an event or a channel subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent exactly as given.
    Raw(String),
    /// JSON-encoded before sending.
    Json(serde_json::Value),
}

impl Payload {
    /// Encode to the string form sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a structured value cannot be serialized.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Payload::Raw(raw) => Ok(raw.clone()),
            Payload::Json(value) => serde_json::to_string(value),
        }
    }

    /// Build a structured payload from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted to JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Payload::Json)
    }
}

impl From<String> for Payload {
    fn from(raw: String) -> Self {
        Payload::Raw(raw)
    }
}

impl From<&str> for Payload {
    fn from(raw: &str) -> Self {
        Payload::Raw(raw.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// Body of a trigger request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event name.
    pub name: String,
    /// Encoded event data.
    pub data: String,
    /// Target channels.
    pub channels: Vec<String>,
}

impl EventPayload {
    /// Create a new event payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be encoded.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        data: &Payload,
        channels: &[S],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.into(),
            data: data.encode()?,
            channels: channels.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }

    /// Encode the payload as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_payload_passes_through() {
        let payload = Payload::from("already {encoded}");
        assert_eq!(payload.encode().unwrap(), "already {encoded}");
    }

    #[test]
    fn test_structured_payload_is_encoded() {
        let payload = Payload::from(json!({"foo": "bar"}));
        assert_eq!(payload.encode().unwrap(), r#"{"foo":"bar"}"#);

        let string_value = Payload::from(json!("text"));
        assert_eq!(string_value.encode().unwrap(), r#""text""#);
    }

    #[test]
    fn test_event_payload_body() {
        let data = Payload::from(json!({"msg": "hi"}));
        let event = EventPayload::new("greet", &data, &["ch1"]).unwrap();

        assert_eq!(
            event.to_json().unwrap(),
            r#"{"name":"greet","data":"{\"msg\":\"hi\"}","channels":["ch1"]}"#
        );
    }
}
