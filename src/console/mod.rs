//! Command and variable registry.
//!
//! Callers register named commands and typed variables on a [`Console`]
//! and drive them either through free-text command lines
//! ([`Console::parse_command`]) or through typed calls.

mod args;
mod entry;
mod history;
mod registry;
mod types;
mod variable;

#[cfg(test)]
mod tests;

pub use args::parse_command_line_args;
pub use entry::{Command, Entry};
pub use history::History;
pub use registry::Console;
pub use types::{ConsoleError, Handler, HandlerResult, InvokeOutcome, Invocation};
pub use variable::{TypedVariable, Variable};
