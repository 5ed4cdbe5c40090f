//! Configuration errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors raised while loading `.tutor.toml` files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A config file is not valid TOML or has unknown keys.
    #[error("invalid config file {path}: {source}")]
    ParseToml {
        /// Config file.
        path: PathBuf,
        /// Parser error, including the offending line.
        source: de::Error,
    },

    /// A `~` path was used but the home directory is unknown.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// The knowledge path exists but could not be canonicalized.
    #[error("cannot resolve knowledge path {path}: {source}")]
    ResolveKnowledgePath {
        /// Path as joined to its config directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
