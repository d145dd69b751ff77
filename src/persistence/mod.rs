//! Config file persistence for console variables.
//!
//! Variables registered with a config and section name are written to and
//! read from `<config>.cfg` files through [`Console::write_config`] and
//! [`Console::load_config`].
//!
//! [`Console::write_config`]: crate::console::Console::write_config
//! [`Console::load_config`]: crate::console::Console::load_config

mod codec;
mod error;
mod file;


use std::path::{Path, PathBuf};

pub use error::ConfigError;
pub use file::ConfigFile;

/// Extension of config files.
pub const CONFIG_EXTENSION: &str = "cfg";

/// Path of the file holding `config_name` inside `directory`.
pub fn config_path(directory: &Path, config_name: &str) -> PathBuf {
    directory.join(format!("{config_name}.{CONFIG_EXTENSION}"))
}
