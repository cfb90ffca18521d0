use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReconcileError>;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Fresh body is not valid JSON: {0}")]
    MalformedFresh(#[source] serde_json::Error),

    #[error("Stored body is not valid JSON: {0}")]
    MalformedOld(#[source] serde_json::Error),

    #[error("Only JSON objects are reconciled")]
    NotAnObject,

    #[error("Failed to render merged body: {0}")]
    Render(#[source] serde_json::Error),
}
