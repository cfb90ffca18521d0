use thiserror::Error;

/// Result type for snippet operations
pub type Result<T> = std::result::Result<T, SnippetError>;

/// Errors raised by the snippet model and codec
#[derive(Error, Debug)]
pub enum SnippetError {
    /// Request line names a method outside GET/POST/PUT/DELETE/PATCH
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// IO error while reading a snippet file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
