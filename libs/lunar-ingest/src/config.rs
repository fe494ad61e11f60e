use serde::Deserialize;

// ---------------------------------------------------------------------------
// Broker
// ---------------------------------------------------------------------------

/// Kafka producer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Broker addresses, comma-separated.
    pub bootstrap_servers: String,
    /// Topic every envelope is appended to.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Upper bound on waiting for the broker delivery acknowledgment.
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
    /// Max time records are buffered before a produce request is sent.
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

fn default_topic() -> String {
    "rocket-launch".into()
}
fn default_message_timeout_ms() -> u64 {
    5000
}
fn default_linger_ms() -> u64 {
    5
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Upper bound on one insert call: acquire + transaction + commit.
    #[serde(default = "default_insert_timeout_secs")]
    pub insert_timeout_secs: u64,
}

fn default_db_host() -> String {
    "localhost".into()
}
fn default_db_port() -> u16 {
    5432
}
fn default_pool_size() -> usize {
    10
}
fn default_insert_timeout_secs() -> u64 {
    5
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// Everything the pipeline needs to build its two writers. Passed in
/// explicitly; there is no module-level configuration state.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub broker: BrokerConfig,
    pub database: DatabaseConfig,
}
