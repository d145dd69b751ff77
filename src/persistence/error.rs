use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while writing or reading config files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The target directory does not exist or is not a directory.
    ///
    /// Config files are never written into a directory that has to be
    /// created first; the caller owns the directory layout.
    #[error("config directory '{0}' could not be opened")]
    DirectoryNotFound(PathBuf),

    /// The config file does not exist.
    #[error("config file '{0}' does not exist")]
    FileNotFound(PathBuf),

    /// No variable was registered for the config name.
    ///
    /// Only variables bound to both a config and a non-empty section are
    /// indexed, so a config whose variables all lack a section is unknown
    /// too. No file is written in that case.
    #[error("no variables are registered for config '{0}'")]
    UnknownConfig(String),

    /// Error occurred during file I/O operations
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Failed to parse TOML content
    #[error("failed to parse TOML from {location}: {details}")]
    TomlParse {
        /// Location of the TOML (file path, "string", etc.)
        location: String,
        /// Parse error details
        details: String,
    },

    /// Error occurred while serializing the config
    #[error("failed to serialize config: {details}")]
    Serialization {
        /// Serialization error details
        details: String,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            details: error.to_string(),
        }
    }
}
