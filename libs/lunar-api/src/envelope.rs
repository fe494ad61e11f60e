use serde_json::Value;

use crate::error::TransformError;

/// The four required metadata fields common to every event type.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMetadata {
    pub channel: String,
    pub message_number: i64,
    pub message_type: String,
    /// Timestamp-like value carried verbatim (string or number), never
    /// replaced by wall-clock time.
    pub message_time: Value,
}

/// One inbound telemetry event, exactly as received.
///
/// Keeps the raw JSON value alongside the parsed metadata so the log
/// publisher can serialize what arrived rather than a re-projection that
/// drops unknown fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    metadata: EventMetadata,
    raw: Value,
}

impl EventEnvelope {
    /// Validate the metadata block of a raw payload.
    ///
    /// Fails with [`TransformError::MalformedEnvelope`] naming the first
    /// missing or mistyped field. The `message` body is not inspected here;
    /// its shape is the transformer's concern.
    pub fn parse(raw: Value) -> Result<Self, TransformError> {
        let metadata = raw
            .get("metadata")
            .and_then(Value::as_object)
            .ok_or(TransformError::MalformedEnvelope { field: "metadata" })?;

        let channel = metadata
            .get("channel")
            .and_then(Value::as_str)
            .ok_or(TransformError::MalformedEnvelope { field: "channel" })?
            .to_string();

        let message_number = metadata
            .get("messageNumber")
            .and_then(Value::as_i64)
            .ok_or(TransformError::MalformedEnvelope { field: "messageNumber" })?;

        let message_type = metadata
            .get("messageType")
            .and_then(Value::as_str)
            .ok_or(TransformError::MalformedEnvelope { field: "messageType" })?
            .to_string();

        let message_time = match metadata.get("messageTime") {
            Some(v) if !v.is_null() => v.clone(),
            _ => return Err(TransformError::MalformedEnvelope { field: "messageTime" }),
        };

        Ok(Self {
            metadata: EventMetadata {
                channel,
                message_number,
                message_type,
                message_time,
            },
            raw,
        })
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    /// Type-specific message body, if present.
    pub fn message(&self) -> Option<&Value> {
        self.raw.get("message")
    }

    /// The payload exactly as received. This is what the log stores.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}
