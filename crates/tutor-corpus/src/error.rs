//! Error types for knowledge loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading the knowledge base.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The knowledge directory does not exist.
    #[error("knowledge directory does not exist: {path}")]
    MissingDirectory {
        /// Path that was expected to be a directory.
        path: PathBuf,
    },

    /// Failed to list the knowledge directory.
    #[error("failed to list knowledge directory {path}: {source}")]
    ReadDirectory {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Failed to read a topic file.
    #[error("failed to read topic file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A topic file is not valid topic JSON.
    #[error("failed to parse topic file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A topic id cannot be used as a file name.
    #[error("invalid topic id '{id}': ids must be non-empty and contain no path separators")]
    InvalidTopicId {
        /// The rejected id.
        id: String,
    },
}
