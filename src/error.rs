//! Error types for the export engine.
//!
//! Recoverable data issues (dangling asset references, missing thumbnails)
//! are handled silently by the normalizer and renderer and never surface
//! here; this module covers the failures that abort an export.

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling export artifacts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Asset data is not a recognizable base64 data URL
    #[error("Malformed data URL for asset '{0}'")]
    MalformedDataUrl(String),

    /// Base64 payload of an asset failed to decode
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Two entries with the same path were added to one archive
    #[error("Duplicate archive path: {0}")]
    DuplicateArchivePath(String),

    /// Manifest serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
