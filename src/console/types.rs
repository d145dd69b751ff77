use std::error::Error;

use thiserror::Error;

use crate::value::{Value, ValueKind};

/// Errors returned by registry operations.
///
/// Dispatch never returns these; an unknown command is reported through
/// [`InvokeOutcome::NotFound`] instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsoleError {
    /// A command or variable with the same normalized name exists.
    ///
    /// Commands and variables share one namespace, and names are compared
    /// after case normalization, so `Volume` collides with `volume` on a
    /// case-insensitive console. The entry registered first is kept.
    #[error("'{0}' is already registered")]
    DuplicateName(String),

    /// The default value has no native variable type.
    ///
    /// Returned by [`Console::register_value`](super::Console::register_value)
    /// for [`Value::None`], the only tag without a native counterpart.
    #[error("cannot create variable '{name}' from a {kind} value")]
    UnsupportedType {
        /// Name the variable was registered under
        name: String,
        /// Tag of the rejected default value
        kind: ValueKind,
    },

    /// No variable is registered under the name.
    #[error("Variable not found: {0}")]
    NotFound(String),
}

/// Result returned by command handlers.
///
/// An error is logged by the registry and goes no further.
pub type HandlerResult = Result<(), Box<dyn Error>>;

/// Callback run when a command or variable is invoked.
pub type Handler = Box<dyn FnMut(&Invocation<'_>) -> HandlerResult>;

/// What a handler sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Normalized name of the invoked entry.
    pub name: &'a str,

    /// Arguments in the order they were supplied.
    pub args: &'a [Value],

    /// Current value of the variable, already updated from `args[0]`.
    /// `None` for plain commands.
    pub value: Option<&'a Value>,
}

/// How a dispatch call was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeOutcome {
    /// The command line held no tokens.
    Empty,

    /// Nothing is registered under the name.
    NotFound,

    /// The handler ran, if one is attached. `updated` is set when a variable
    /// took a new value from the first argument.
    Invoked {
        /// Whether the variable's value changed
        updated: bool,
    },

    /// A variable was invoked with its current value and the handler was
    /// skipped under [`InvokePolicy::OnChange`](crate::settings::InvokePolicy::OnChange).
    Skipped,

    /// A variable was invoked without arguments; this is its value.
    Read(Value),
}
