//! Devconsole - In-process developer console.
//!
//! An application registers named commands and typed variables, then drives
//! them from free-text command lines or from typed calls. Variables bound to
//! a config file can be written out and loaded back by name.
//!
//! - Tagged [`Value`] with text inference
//! - Typed variables over a closed set of native types
//! - Command registry with dispatch, history and argument mapping
//! - Sectioned config files on disk
//!
//! # Quick Start
//!
//! ```rust
//! use devconsole::{Console, InvokeOutcome, TypedVariable, Vec2};
//!
//! let mut console = Console::new();
//!
//! console
//!     .add_variable(TypedVariable::new("c_resolution", Vec2::new(1280_i64, 720)).in_config("ClientSettings", "Display"))
//!     .expect("name is free");
//!
//! let outcome = console.parse_command("c_resolution 1920,1080");
//! assert_eq!(outcome, InvokeOutcome::Invoked { updated: true });
//! assert_eq!(
//!     console.get_variable_value::<Vec2<i64>>("c_resolution"),
//!     Some(Vec2::new(1920, 1080))
//! );
//! ```

/// Tagged values and the native types variables may hold.
pub mod value;

/// Command and variable registry.
pub mod console;

/// Config file persistence.
pub mod persistence;

/// Console behavior settings.
pub mod settings;

/// Tracing subscriber setup.
pub mod tracing_config;

pub use console::{
    Command, Console, ConsoleError, Entry, InvokeOutcome, Invocation, TypedVariable, Variable,
};
pub use persistence::{ConfigError, ConfigFile};
pub use settings::{ConsoleSettings, InvokePolicy, SettingsError};
pub use value::{Name, Value, ValueKind, VariableType, Vec2, Vec2f, Vec2i, Vec3, Vec3f, Vec3i};
