use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a variable's handler runs when the supplied value equals the
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvokePolicy {
    /// Run the handler on every invocation that carries an argument.
    #[default]
    Always,

    /// Run the handler only when the argument changed the value.
    OnChange,
}

/// Behavior switches for a [`Console`](crate::console::Console).
///
/// Every field is optional in the settings file and falls back to its
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Keep command names as typed instead of lower-casing them.
    pub case_sensitive: bool,

    /// Log `name value` each time a variable is invoked.
    pub echo: bool,

    /// Handler policy for variables invoked with an unchanged value.
    pub invoke_policy: InvokePolicy,

    /// Maximum number of remembered command lines. Zero keeps everything.
    pub history_limit: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            echo: true,
            invoke_policy: InvokePolicy::default(),
            history_limit: 128,
        }
    }
}

/// Errors raised while reading a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path of the settings file
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The settings file is not valid TOML for [`ConsoleSettings`].
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

impl ConsoleSettings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// Returns `SettingsError::TomlParse` if the text is not valid settings TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::TomlParse {
            location: "string".to_string(),
            details: e.to_string(),
        })
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns `SettingsError::Io` if the file cannot be read and
    /// `SettingsError::TomlParse` if its content is invalid.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::TomlParse {
            location: path.display().to_string(),
            details: e.to_string(),
        })
    }
}
