use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rdkafka::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};

use lunar_api::{EventEnvelope, EventLog, IngestError};

use crate::config::BrokerConfig;

/// Kafka-backed event log.
///
/// Appends every raw envelope to a single fixed topic and waits for the
/// broker delivery report before reporting success. No partition key: the
/// broker's default assignment is sufficient for this stream.
pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
    ack_timeout: Duration,
}

impl KafkaPublisher {
    /// Build the producer. Does not contact the broker; the first publish
    /// does.
    pub fn new(config: &BrokerConfig) -> Result<Self, IngestError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            .set("linger.ms", config.linger_ms.to_string())
            .create()
            .map_err(|e| IngestError::config(format!("kafka producer: {e}")))?;

        Ok(Self {
            producer,
            topic: config.topic.clone(),
            ack_timeout: Duration::from_millis(config.message_timeout_ms),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl EventLog for KafkaPublisher {
    fn publish<'a>(
        &'a self,
        envelope: &'a EventEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<(), IngestError>> + Send + 'a>> {
        Box::pin(async move {
            // The log stores what was received, not a re-projection.
            let payload = serde_json::to_vec(envelope.raw())
                .map_err(|e| IngestError::encode(format!("serialize envelope: {e}")))?;

            let record = FutureRecord::<(), _>::to(&self.topic).payload(&payload);
            self.producer
                .send(record, self.ack_timeout)
                .await
                .map_err(|(e, _)| {
                    IngestError::broker(format!("append to '{}': {e}", self.topic))
                })?;

            tracing::debug!(topic = %self.topic, "append acknowledged");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrokerConfig;

    #[test]
    fn test_new_does_not_require_broker() {
        let publisher = KafkaPublisher::new(&BrokerConfig {
            bootstrap_servers: "localhost:9092".into(),
            topic: "rocket-launch".into(),
            message_timeout_ms: 1000,
            linger_ms: 5,
        })
        .unwrap();
        assert_eq!(publisher.topic(), "rocket-launch");
    }
}
