//! Crate-wide error type and result alias.
//!
//! Everything fallible in the crate funnels into [`IndexError`]. Query parse
//! failures are deliberately absent: per the search contract they are carried
//! as a message on the result set, not raised as errors.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Configuration could not be read, parsed, or validated.
    #[error("config error: {0}")]
    Config(String),

    /// An analyzer identifier has no registered factory.
    #[error("unknown analyzer `{0}` (expected one of: simple, en_stem, whitespace)")]
    UnknownAnalyzer(String),

    /// A tenant id failed validation before any path was formed from it.
    #[error("invalid tenant id `{id}`: {reason}")]
    InvalidTenantId { id: String, reason: String },

    /// Filesystem access to an index storage location failed.
    #[error("index storage at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A second writer session was opened against a location that already
    /// has one. The coordinator's tenant lock prevents this; seeing it means
    /// the session layer was driven outside that lock.
    #[error("another writer session is open for {path}")]
    WriterConflict { path: PathBuf },

    /// Any other failure reported by the text index engine.
    #[error("text index engine: {0}")]
    Engine(#[from] tantivy::TantivyError),
}

impl IndexError {
    /// Wrap a filesystem error with the storage location it occurred at.
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
