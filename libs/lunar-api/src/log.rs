use std::future::Future;
use std::pin::Pin;

use crate::envelope::EventEnvelope;
use crate::error::IngestError;

/// Append-only event log (the message bus topic).
///
/// Implementations live downstream; this crate only defines the seam so
/// the pipeline can be exercised against fakes.
pub trait EventLog: Send + Sync {
    /// Append the raw envelope to the fixed topic.
    ///
    /// Resolves only once the broker has acknowledged the append: `Ok`
    /// means durable, not merely sent. Not retried internally.
    fn publish<'a>(
        &'a self,
        envelope: &'a EventEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<(), IngestError>> + Send + 'a>>;
}
