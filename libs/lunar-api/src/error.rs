/// Category of an ingestion I/O error. Lets callers and the boundary
/// distinguish permanent misconfiguration from transient write failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration: permanent, fail at startup.
    Config,
    /// Payload serialization failure before any write was attempted.
    Encode,
    /// Broker unreachable, append timed out, or delivery not acknowledged.
    Broker,
    /// Transaction execute/commit failure in the relational store.
    Storage,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Encode => f.write_str("encode"),
            ErrorKind::Broker => f.write_str("broker"),
            ErrorKind::Storage => f.write_str("storage"),
        }
    }
}

/// Unified error type for the I/O side of ingestion (log and store).
///
/// Carries an `ErrorKind` for categorization and a human-readable message.
/// Client-side classification failures are a separate type
/// ([`TransformError`]) because they map to a different response class.
#[derive(Clone)]
pub struct IngestError {
    kind: ErrorKind,
    message: String,
}

impl IngestError {
    /// Configuration error: permanent, fail at startup.
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    /// Serialization error before any write.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Encode, message: msg.into() }
    }

    /// Log append failure: aborts the ingestion before any database write.
    pub fn broker(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Broker, message: msg.into() }
    }

    /// Store failure after a confirmed append: the event stays recoverable
    /// from the log.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Storage, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Debug for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for IngestError {}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        Self { kind: ErrorKind::Encode, message: e.to_string() }
    }
}

/// Classification failure for an inbound envelope. Terminal for the
/// request; nothing is written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("malformed envelope: missing or invalid metadata field '{field}'")]
    MalformedEnvelope { field: &'static str },

    #[error("unknown message type '{0}'")]
    UnknownMessageType(String),
}
