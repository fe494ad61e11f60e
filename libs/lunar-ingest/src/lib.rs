pub mod config;
mod pipeline;
mod publisher;
mod store;

pub use config::{BrokerConfig, DatabaseConfig, IngestConfig};
pub use pipeline::{IngestOutcome, IngestionPipeline};
pub use publisher::KafkaPublisher;
pub use store::PostgresStore;
