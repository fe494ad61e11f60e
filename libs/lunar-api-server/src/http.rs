use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use lunar_ingest::IngestOutcome;

use super::AppState;

// --- GET / ---

pub(crate) async fn handle_index() -> impl IntoResponse {
    "Lunar Rocket Launcher"
}

// --- POST /messages ---

pub(crate) async fn handle_ingest(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let pipeline = state.pipeline.clone();

    // Detached task: a client disconnect must not cancel a dual write
    // in flight.
    let handle = tokio::spawn(async move { pipeline.ingest(payload).await });
    let outcome = match handle.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "ingestion task aborted");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("error: ingestion task: {e}"),
            )
                .into_response();
        }
    };

    let status = status_for(&outcome);
    match outcome {
        IngestOutcome::Completed => (status, "package received").into_response(),
        IngestOutcome::Rejected(e) => (status, format!("error: {e}")).into_response(),
        IngestOutcome::PublishFailed(e) | IngestOutcome::StoreFailed(e) => {
            (status, format!("error: {e}")).into_response()
        }
    }
}

/// One response class per terminal pipeline state: success, client error,
/// server error.
fn status_for(outcome: &IngestOutcome) -> StatusCode {
    match outcome {
        IngestOutcome::Completed => StatusCode::OK,
        IngestOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        IngestOutcome::PublishFailed(_) | IngestOutcome::StoreFailed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
