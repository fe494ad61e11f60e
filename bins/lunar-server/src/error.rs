#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("ingest: {0}")]
    Ingest(#[from] lunar_api::IngestError),

    #[error("signal: {0}")]
    Signal(#[from] std::io::Error),
}
