use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::{ConfigError, ConfigFile, config_path};
use crate::console::Console;

impl Console {
    /// Writes every variable bound to `config_name` into
    /// `<directory>/<config_name>.cfg`.
    ///
    /// Each variable is stored under its section and name. An existing file
    /// is replaced, not merged. Returns the path written.
    ///
    /// # Errors
    /// * `ConfigError::DirectoryNotFound` - If `directory` is not a directory
    /// * `ConfigError::UnknownConfig` - If no variable is bound to the config
    /// * `ConfigError::Io` - If the file cannot be written
    pub fn write_config(
        &self,
        config_name: &str,
        directory: impl AsRef<Path>,
    ) -> Result<PathBuf, ConfigError> {
        let directory = open_directory(directory.as_ref())?;

        let variables = self.config_variables(config_name).ok_or_else(|| {
            error!(config = config_name, "Error writing config. No variables are bound to it");
            ConfigError::UnknownConfig(config_name.to_string())
        })?;

        let mut file = ConfigFile::new();
        for variable in variables {
            if let Some(section) = variable.section_name() {
                file.set_value(section, variable.name(), variable.value().clone());
            }
        }

        let path = config_path(directory, config_name);
        file.save(&path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Error writing config file");
        })?;

        info!(config = config_name, path = %path.display(), "Wrote config");
        Ok(path)
    }

    /// Loads `<directory>/<config_name>.cfg` into the registered variables.
    ///
    /// A key is applied only when a variable of that name is registered and
    /// its section matches the file section; anything else is discarded.
    /// Returns the number of variables updated.
    ///
    /// # Errors
    /// * `ConfigError::DirectoryNotFound` - If `directory` is not a directory
    /// * `ConfigError::FileNotFound` - If the config file does not exist
    /// * `ConfigError::TomlParse` - If the file content is invalid
    pub fn load_config(
        &mut self,
        config_name: &str,
        directory: impl AsRef<Path>,
    ) -> Result<usize, ConfigError> {
        let directory = open_directory(directory.as_ref())?;
        let path = config_path(directory, config_name);

        let file = ConfigFile::load(&path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Error reading config file");
        })?;

        let mut applied = 0;

        for (section, key, value) in file.entries() {
            match self.get_variable_mut(key) {
                Some(variable) if variable.section_name() == Some(section) => {
                    variable.set_value(value.clone());
                    applied += 1;
                }
                _ => debug!(section, key, "Discarding config key with no matching variable"),
            }
        }

        info!(config = config_name, applied, "Loaded config");
        Ok(applied)
    }
}

fn open_directory(directory: &Path) -> Result<&Path, ConfigError> {
    if directory.is_dir() {
        Ok(directory)
    } else {
        error!(directory = %directory.display(), "Could not open the config directory");
        Err(ConfigError::DirectoryNotFound(directory.to_path_buf()))
    }
}
