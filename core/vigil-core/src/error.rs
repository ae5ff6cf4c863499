//! Error types for vigil-core.
//!
//! Hooks must never take down the session they observe, so most
//! collaborators (git, compilers, formatters) degrade to empty results
//! instead of returning errors. `VigilError` is reserved for the small
//! set of failures the caller can actually act on: resolving the
//! storage root and reading or writing vigil's own files.

use std::path::PathBuf;

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Error Type
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum VigilError {
    /// The home directory could not be resolved, so there is nowhere
    /// to put the status directory.
    #[error("could not determine home directory")]
    MissingHome,

    /// An I/O operation on a vigil-owned file failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing or deserializing a vigil-owned document failed.
    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A path that must have a parent directory (for atomic writes)
    /// does not have one.
    #[error("path has no parent directory: {0}")]
    NoParentDir(PathBuf),
}

pub type Result<T> = std::result::Result<T, VigilError>;

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

impl From<VigilError> for String {
    fn from(err: VigilError) -> Self {
        err.to_string()
    }
}
