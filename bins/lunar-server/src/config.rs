use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use lunar_ingest::{BrokerConfig, DatabaseConfig};

#[derive(Parser)]
#[command(name = "lunar-server", about = "Rocket telemetry ingestion server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the ingestion server
    Serve(ServeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml", env = "LUNAR_CONFIG")]
    pub config: String,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    pub broker: BrokerConfig,
    pub database: DatabaseConfig,
}

fn default_api_port() -> u16 {
    8088
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self, crate::error::ServerError> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::error::ServerError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?;
        toml::from_str(&content).map_err(|e| crate::error::ServerError::Config {
            context: "parse",
            detail: format!("'{path}': {e}"),
        })
    }
}
