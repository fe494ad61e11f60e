use std::sync::Arc;

use lunar_api::{EventEnvelope, EventLog, EventStore, IngestError, TransformError, transform};

use crate::config::IngestConfig;
use crate::publisher::KafkaPublisher;
use crate::store::PostgresStore;

/// Terminal outcome of one ingestion. Each variant maps to exactly one
/// response class at the boundary.
#[derive(Debug)]
pub enum IngestOutcome {
    /// Published and persisted.
    Completed,
    /// Classification failed; nothing was written anywhere.
    Rejected(TransformError),
    /// The log append could not be confirmed; the store was never asked.
    PublishFailed(IngestError),
    /// Durable in the log but absent from the relational view. Recovery is
    /// replay from the log, not a retry here.
    StoreFailed(IngestError),
}

/// Orchestrates classify, publish, persist for one envelope at a time.
///
/// Persistence is attempted only after the log append is acknowledged: the
/// log is the primary source of truth and must never lag the relational
/// view. Concurrency lives one level up, one task per request.
pub struct IngestionPipeline {
    log: Arc<dyn EventLog>,
    store: Arc<dyn EventStore>,
}

impl IngestionPipeline {
    pub fn new(log: Arc<dyn EventLog>, store: Arc<dyn EventStore>) -> Self {
        Self { log, store }
    }

    /// Build the Kafka and Postgres writers from explicit configuration.
    pub fn from_config(config: &IngestConfig) -> Result<Self, IngestError> {
        let log = KafkaPublisher::new(&config.broker)?;
        let store = PostgresStore::new(&config.database)?;
        Ok(Self::new(Arc::new(log), Arc::new(store)))
    }

    /// Run one raw payload through the dual write.
    pub async fn ingest(&self, payload: serde_json::Value) -> IngestOutcome {
        let envelope = match EventEnvelope::parse(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "rejected envelope");
                return IngestOutcome::Rejected(e);
            }
        };

        let row = match transform(&envelope) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(error = %e, "rejected envelope");
                return IngestOutcome::Rejected(e);
            }
        };

        let meta = envelope.metadata();
        tracing::debug!(
            channel = %meta.channel,
            message_number = meta.message_number,
            message_type = %meta.message_type,
            "classified"
        );

        if let Err(e) = self.log.publish(&envelope).await {
            tracing::error!(error = %e, message_type = %meta.message_type, "log append failed");
            return IngestOutcome::PublishFailed(e);
        }

        if let Err(e) = self.store.insert(&row).await {
            tracing::error!(
                error = %e,
                message_type = %meta.message_type,
                "persist failed after confirmed append, event recoverable from the log"
            );
            return IngestOutcome::StoreFailed(e);
        }

        tracing::debug!(message_type = %meta.message_type, "persisted");
        IngestOutcome::Completed
    }
}
