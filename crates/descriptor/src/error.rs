use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DescriptorError>;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported manifest format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    /// A type with no placeholder rule. Callers fall back to the string placeholder.
    #[error("No placeholder rule for type `{0}`")]
    UnmappableType(String),
}
