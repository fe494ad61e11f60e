use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use lunar_ingest::{IngestConfig, IngestionPipeline};

use crate::config::{ServeArgs, ServerConfig};
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    tracing::info!("lunar-server starting");

    // --- Load config ---
    let config = ServerConfig::load(&args.config)?;
    tracing::info!(config = %args.config, "loaded config");

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();

    // --- Build the dual-write pipeline ---
    let ingest = IngestConfig {
        broker: config.broker,
        database: config.database,
    };
    let pipeline = Arc::new(IngestionPipeline::from_config(&ingest)?);
    tracing::info!(
        brokers = %ingest.broker.bootstrap_servers,
        topic = %ingest.broker.topic,
        dbname = %ingest.database.dbname,
        "pipeline ready"
    );

    // --- API server (HTTP boundary) ---
    let api_port = config.api_port;
    let api_pipeline = pipeline.clone();
    let api_token = token.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = lunar_api_server::run(api_port, api_pipeline, api_token).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    tracing::info!(port = config.api_port, "api server listening");
    tracing::info!("server ready");

    // --- Wait for Ctrl+C ---
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down...");

    // Signal the boundary to stop accepting, then drain in-flight dual
    // writes before aborting anything still running.
    token.cancel();
    tokio::time::sleep(Duration::from_secs(5)).await;

    if !api_handle.is_finished() {
        api_handle.abort();
    }
    let _ = api_handle.await;

    tracing::info!("shutdown complete");
    Ok(())
}
