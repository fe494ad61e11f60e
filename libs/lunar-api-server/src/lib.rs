mod http;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;

use lunar_ingest::IngestionPipeline;

#[derive(Clone)]
struct AppState {
    pipeline: Arc<IngestionPipeline>,
}

/// Ingestion HTTP boundary: one JSON envelope per POST.
pub async fn run(
    port: u16,
    pipeline: Arc<IngestionPipeline>,
    shutdown: CancellationToken,
) -> Result<(), String> {
    let state = AppState { pipeline };

    let app = Router::new()
        .route("/", get(http::handle_index))
        .route("/messages", post(http::handle_ingest))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| format!("bind api :{port}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| format!("axum serve: {e}"))?;

    Ok(())
}
