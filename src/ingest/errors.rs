use thiserror::Error;

// * Unified Error type for the Ingestion Layer.
// * These are the only fatal conditions: a snapshot that fails here never reaches the engine.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate page URL: {0}")]
    DuplicatePage(String),

    #[error("Page at position {0} has an empty URL")]
    EmptyUrl(usize),
}
