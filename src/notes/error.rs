//! Errors for the notes list and its storage.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    /// No note carries the requested id.
    #[error("Note not found: {0}")]
    NotFound(u64),

    #[error("Failed to read notes from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write notes to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Notes file {path} is not valid JSON")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize notes")]
    Serialize(#[from] serde_json::Error),
}
