use std::fmt;

use tracing::warn;

use super::{
    Variable,
    types::{Handler, HandlerResult, Invocation},
};
use crate::value::Value;

/// A named action with no state of its own.
pub struct Command {
    pub(crate) name: String,
    handler: Option<Handler>,
}

impl Command {
    /// Creates a command with no handler attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: None,
        }
    }

    /// Attaches the handler run on invocation.
    pub fn on_invoke(
        mut self,
        handler: impl FnMut(&Invocation<'_>) -> HandlerResult + 'static,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Name the command is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the handler with every argument.
    pub fn invoke(&mut self, args: &[Value]) {
        let invocation = Invocation {
            name: &self.name,
            args,
            value: None,
        };
        run_handler(self.handler.as_mut(), &invocation);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

pub(crate) fn run_handler(handler: Option<&mut Handler>, invocation: &Invocation<'_>) {
    let Some(handler) = handler else {
        return;
    };

    if let Err(e) = handler(invocation) {
        warn!(command = invocation.name, error = %e, "Command handler failed");
    }
}

/// A registered name: either a plain command or a variable.
pub enum Entry {
    /// Plain command.
    Command(Command),
    /// Typed variable.
    Variable(Box<dyn Variable>),
}

impl Entry {
    /// Normalized name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Entry::Command(command) => command.name(),
            Entry::Variable(variable) => variable.name(),
        }
    }

    /// Returns `true` for variables.
    pub fn is_variable(&self) -> bool {
        matches!(self, Entry::Variable(_))
    }

    /// Returns the variable facet, if this is a variable.
    pub fn as_variable(&self) -> Option<&dyn Variable> {
        match self {
            Entry::Variable(variable) => Some(variable.as_ref()),
            Entry::Command(_) => None,
        }
    }

    /// Returns the mutable variable facet, if this is a variable.
    pub fn as_variable_mut(&mut self) -> Option<&mut (dyn Variable + 'static)> {
        match self {
            Entry::Variable(variable) => Some(variable.as_mut()),
            Entry::Command(_) => None,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Command(command) => command.fmt(f),
            Entry::Variable(variable) => f
                .debug_struct("Variable")
                .field("name", &variable.name())
                .field("value", variable.value())
                .finish(),
        }
    }
}
