use std::collections::hash_map::{self, HashMap};

use tracing::{debug, info, warn};

use super::{
    Command, ConsoleError, Entry, History, InvokeOutcome, TypedVariable, Variable,
    args::parse_command_line_args,
    types::{HandlerResult, Invocation},
};
use crate::{
    settings::{ConsoleSettings, InvokePolicy},
    value::{Name, Value, ValueKind, VariableType},
};

/// Registry of commands and variables.
///
/// The console owns every entry, keyed by normalized name (lower-cased
/// unless [`ConsoleSettings::case_sensitive`] is set). It also keeps the
/// command-line history and an index of which variables belong to which
/// config file.
///
/// A console is meant to be driven from a single loop. Handlers are not
/// `Send`, so neither is the console.
///
/// ```text
/// console
/// ├── entries          name -> Command | Variable
/// ├── history          recent command lines + recall cursor
/// └── config_index     config name -> variable names
/// ```
pub struct Console {
    entries: HashMap<String, Entry>,
    history: History,
    config_index: HashMap<String, Vec<String>>,
    settings: ConsoleSettings,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates an empty console with default settings.
    pub fn new() -> Self {
        Self::with_settings(ConsoleSettings::default())
    }

    /// Creates an empty console with the given settings.
    pub fn with_settings(settings: ConsoleSettings) -> Self {
        Self {
            entries: HashMap::new(),
            history: History::new(settings.history_limit),
            config_index: HashMap::new(),
            settings,
        }
    }

    /// Settings the console was created with.
    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    /// Turns logging of invoked variables on or off.
    pub fn set_echo(&mut self, echo: bool) {
        self.settings.echo = echo;
    }

    /// Applies the console's case rule to a name.
    pub fn normalize_name(&self, name: &str) -> String {
        if self.settings.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// Registers a plain command.
    ///
    /// # Errors
    /// Returns `ConsoleError::DuplicateName` if the normalized name is taken.
    /// The existing entry is left untouched.
    pub fn register_command(
        &mut self,
        name: &str,
        handler: impl FnMut(&Invocation<'_>) -> HandlerResult + 'static,
    ) -> Result<(), ConsoleError> {
        self.add_command(Command::new(name).on_invoke(handler))
    }

    /// Registers a prepared command.
    ///
    /// # Errors
    /// Returns `ConsoleError::DuplicateName` if the normalized name is taken.
    pub fn add_command(&mut self, mut command: Command) -> Result<(), ConsoleError> {
        let key = self.normalize_name(&command.name);
        command.name.clone_from(&key);
        self.insert(key, Entry::Command(command))
    }

    /// Registers a variable holding `default`, with no handler and no config
    /// binding.
    ///
    /// # Errors
    /// Returns `ConsoleError::DuplicateName` if the normalized name is taken.
    pub fn register_variable<T: VariableType>(
        &mut self,
        name: &str,
        default: T,
    ) -> Result<(), ConsoleError> {
        self.add_variable(TypedVariable::new(name, default))
    }

    /// Registers a prepared variable.
    ///
    /// A variable bound to both a config and a section is also added to that
    /// config's index.
    ///
    /// # Errors
    /// Returns `ConsoleError::DuplicateName` if the normalized name is taken.
    pub fn add_variable<T: VariableType>(
        &mut self,
        mut variable: TypedVariable<T>,
    ) -> Result<(), ConsoleError> {
        let key = self.normalize_name(&variable.name);
        variable.name.clone_from(&key);

        let config = variable
            .config_binding()
            .map(|(config, _)| config.to_string());

        self.insert(key.clone(), Entry::Variable(Box::new(variable)))?;

        if let Some(config) = config {
            self.config_index.entry(config).or_default().push(key);
        }

        Ok(())
    }

    /// Registers a variable whose type is taken from a dynamic default value.
    ///
    /// Integers become `i64`, floats `f64`, and every other tag its own
    /// native type. `config` binds the variable like
    /// [`TypedVariable::in_config`].
    ///
    /// # Errors
    /// Returns `ConsoleError::UnsupportedType` for [`Value::None`] and
    /// `ConsoleError::DuplicateName` if the normalized name is taken.
    pub fn register_value(
        &mut self,
        name: &str,
        default: Value,
        config: Option<(&str, &str)>,
    ) -> Result<(), ConsoleError> {
        fn bind<T: VariableType>(
            variable: TypedVariable<T>,
            config: Option<(&str, &str)>,
        ) -> TypedVariable<T> {
            match config {
                Some((config, section)) => variable.in_config(config, section),
                None => variable,
            }
        }

        match default {
            Value::None => Err(ConsoleError::UnsupportedType {
                name: name.to_string(),
                kind: ValueKind::None,
            }),
            Value::Bool(b) => self.add_variable(bind(TypedVariable::new(name, b), config)),
            Value::Int(i) => self.add_variable(bind(TypedVariable::new(name, i), config)),
            Value::Float(f) => self.add_variable(bind(TypedVariable::new(name, f), config)),
            Value::String(s) => self.add_variable(bind(TypedVariable::new(name, s), config)),
            Value::Name(n) => self.add_variable(bind(TypedVariable::<Name>::new(name, n), config)),
            Value::Vec2i(v) => self.add_variable(bind(TypedVariable::new(name, v), config)),
            Value::Vec2f(v) => self.add_variable(bind(TypedVariable::new(name, v), config)),
            Value::Vec3i(v) => self.add_variable(bind(TypedVariable::new(name, v), config)),
            Value::Vec3f(v) => self.add_variable(bind(TypedVariable::new(name, v), config)),
        }
    }

    fn insert(&mut self, key: String, entry: Entry) -> Result<(), ConsoleError> {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(occupied) => {
                warn!(
                    command = %occupied.key(),
                    "Attempted to register a command which has already been registered"
                );
                Err(ConsoleError::DuplicateName(occupied.key().clone()))
            }
            hash_map::Entry::Vacant(vacant) => {
                debug!(command = %vacant.key(), "Registered");
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    /// Looks up any entry by name.
    pub fn get_command(&self, name: &str) -> Option<&Entry> {
        self.entries.get(&self.normalize_name(name))
    }

    /// Looks up any entry by name for mutation.
    pub fn get_command_mut(&mut self, name: &str) -> Option<&mut Entry> {
        let key = self.normalize_name(name);
        self.entries.get_mut(&key)
    }

    /// Looks up a variable by name. Plain commands are not returned.
    pub fn get_variable(&self, name: &str) -> Option<&dyn Variable> {
        self.get_command(name).and_then(Entry::as_variable)
    }

    /// Looks up a variable by name for mutation.
    pub fn get_variable_mut(&mut self, name: &str) -> Option<&mut (dyn Variable + 'static)> {
        self.get_command_mut(name).and_then(Entry::as_variable_mut)
    }

    /// Looks up a variable declared with native type `T`.
    ///
    /// Returns `None` when the variable exists with a different type.
    pub fn get_typed_variable<T: VariableType>(&self, name: &str) -> Option<&TypedVariable<T>> {
        self.get_variable(name)?.as_any().downcast_ref()
    }

    /// Mutable form of [`get_typed_variable`](Self::get_typed_variable).
    pub fn get_typed_variable_mut<T: VariableType>(
        &mut self,
        name: &str,
    ) -> Option<&mut TypedVariable<T>> {
        self.get_variable_mut(name)?.as_any_mut().downcast_mut()
    }

    /// Native value of a variable declared with type `T`.
    pub fn get_variable_value<T: VariableType>(&self, name: &str) -> Option<T> {
        self.get_typed_variable::<T>(name)
            .map(|variable| variable.get().clone())
    }

    /// Sets a variable without running its handler.
    ///
    /// The value is converted into the variable's own type, so an `i32`
    /// variable accepts an `i64`.
    ///
    /// # Errors
    /// Returns `ConsoleError::NotFound` if no variable has the name.
    pub fn update_variable<T: VariableType>(
        &mut self,
        name: &str,
        value: T,
    ) -> Result<(), ConsoleError> {
        let variable = self
            .get_variable_mut(name)
            .ok_or_else(|| ConsoleError::NotFound(name.to_string()))?;
        variable.set_value(value.encode());
        Ok(())
    }

    /// Returns `true` if the variable exists and holds exactly `value`.
    pub fn variable_equals<T: VariableType>(&self, name: &str, value: &T) -> bool {
        self.get_variable(name)
            .is_some_and(|variable| variable.compare(&value.encode()))
    }

    /// Returns `true` if anything is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.get_command(name).is_some()
    }

    /// Every registered entry, in no particular order.
    pub fn commands(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Every registered name, sorted.
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variables bound to a config, in registration order.
    ///
    /// Returns `None` if no variable was registered for the config.
    pub fn config_variables(&self, config_name: &str) -> Option<Vec<&dyn Variable>> {
        let names = self.config_index.get(config_name)?;
        Some(
            names
                .iter()
                .filter_map(|name| self.entries.get(name).and_then(Entry::as_variable))
                .collect(),
        )
    }

    /// Invokes an entry by name.
    ///
    /// A plain command runs its handler with every argument. A variable with
    /// a first argument takes that argument as its new value when it differs
    /// from the current one, then runs its handler with every argument
    /// (subject to [`InvokePolicy`]). The value counts as updated only when
    /// the converted value differs from the old one, so `1.2` sent to an
    /// `f32` variable already holding `1.2` is no change. A variable without
    /// arguments is only read.
    ///
    /// Unknown names are logged and reported as [`InvokeOutcome::NotFound`].
    pub fn invoke_command(&mut self, name: &str, args: &[Value]) -> InvokeOutcome {
        let key = self.normalize_name(name);

        let Some(entry) = self.entries.get_mut(&key) else {
            warn!(command = name, "Command '{name}' is not a valid command");
            return InvokeOutcome::NotFound;
        };

        match entry {
            Entry::Command(command) => {
                command.invoke(args);
                InvokeOutcome::Invoked { updated: false }
            }
            Entry::Variable(variable) => {
                let Some(first) = args.first() else {
                    info!("{variable}");
                    return InvokeOutcome::Read(variable.value().clone());
                };

                // The argument is converted into the variable's type, so a
                // change is judged on the stored value, not the raw argument.
                let updated = !variable.compare(first) && {
                    let before = variable.value().clone();
                    variable.set_value(first.clone());
                    variable.value() != &before
                };

                if self.settings.echo {
                    info!("{variable}");
                }

                if !updated && self.settings.invoke_policy == InvokePolicy::OnChange {
                    return InvokeOutcome::Skipped;
                }

                variable.invoke(args);
                InvokeOutcome::Invoked { updated }
            }
        }
    }

    /// Parses and dispatches a command line.
    ///
    /// The line is recorded in the history and split on whitespace. The
    /// first token names the command; every other token is run through
    /// [`Value::parse`] and passed as an argument.
    pub fn parse_command(&mut self, line: &str) -> InvokeOutcome {
        let Some((command, raw_args)) = split_command_line(line) else {
            return InvokeOutcome::Empty;
        };

        info!("> {}", line.trim());
        self.add_recent_command(line.trim());

        let args: Vec<Value> = raw_args.into_iter().map(Value::parse).collect();
        self.invoke_command(command, &args)
    }

    /// Records a command line for recall.
    pub fn add_recent_command(&mut self, line: &str) {
        self.history.push(line);
    }

    /// Steps the recall cursor back to the next older command line.
    pub fn next_command(&mut self) -> String {
        self.history.older()
    }

    /// Steps the recall cursor forward to the previous, more recent command
    /// line.
    pub fn previous_command(&mut self) -> String {
        self.history.newer()
    }

    /// Recorded command lines.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Applies process arguments to variables.
    ///
    /// Each `-x value` / `--name value` pair sets the variable of that name.
    /// A boolean variable given no value is set to `true`. Flags matching no
    /// variable are logged and ignored. Returns the number of variables set.
    pub fn map_command_line_args<I, S>(&mut self, args: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut applied = 0;

        for (flag, value) in parse_command_line_args(args) {
            let Some(variable) = self.get_variable_mut(&flag) else {
                warn!(argument = %flag, "Unknown command line argument");
                continue;
            };

            if value.is_empty() && variable.value_kind() == ValueKind::Bool {
                variable.set_value(Value::Bool(true));
            } else {
                variable.set_from_str(&value);
            }

            debug!(argument = %flag, value = %variable.value(), "Applied command line argument");
            applied += 1;
        }

        applied
    }

    /// Forgets every entry, the history, and the config index.
    pub fn remove_all(&mut self) {
        self.entries.clear();
        self.history.clear();
        self.config_index.clear();
    }
}

/// Splits a command line into the command token and raw argument tokens.
pub(crate) fn split_command_line(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next()?;
    Some((command, tokens.collect()))
}
