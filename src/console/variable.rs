use std::{
    any::{self, Any},
    fmt,
};

use tracing::debug;

use super::{
    entry::run_handler,
    types::{Handler, HandlerResult, Invocation},
};
use crate::value::{Value, ValueKind, VariableType};

/// Type-erased view of a [`TypedVariable`].
///
/// The registry stores variables behind this trait; typed access goes back
/// through [`as_any`](Variable::as_any) to the concrete `TypedVariable<T>`.
pub trait Variable: Any + fmt::Display {
    /// Normalized name of the variable.
    fn name(&self) -> &str;

    /// Canonical value.
    fn value(&self) -> &Value;

    /// Replaces the value, converting it into the native type.
    fn set_value(&mut self, value: Value);

    /// Replaces the value from raw text.
    fn set_from_str(&mut self, text: &str);

    /// Tag-strict comparison against the canonical value.
    fn compare(&self, value: &Value) -> bool;

    /// Tag of the canonical value.
    fn value_kind(&self) -> ValueKind;

    /// Rust name of the native type.
    fn type_name(&self) -> &'static str;

    /// Config file the variable is persisted to.
    fn config_name(&self) -> Option<&str>;

    /// Section of the config file holding the variable.
    fn section_name(&self) -> Option<&str>;

    /// Runs the handler, if any.
    fn invoke(&mut self, args: &[Value]);

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A named, typed setting that can also be invoked like a command.
///
/// Holds the native `T` next to its [`Value`] projection. Every write goes
/// through both, so `value() == get().encode()` always holds.
pub struct TypedVariable<T: VariableType> {
    pub(crate) name: String,
    native: T,
    projection: Value,
    config_name: Option<String>,
    section_name: Option<String>,
    handler: Option<Handler>,
}

impl<T: VariableType> TypedVariable<T> {
    /// Creates a variable holding `default`.
    pub fn new(name: impl Into<String>, default: T) -> Self {
        let projection = default.encode();
        Self {
            name: name.into(),
            native: default,
            projection,
            config_name: None,
            section_name: None,
            handler: None,
        }
    }

    /// Binds the variable to a section of a config file.
    ///
    /// Only variables with both names non-empty take part in config
    /// read and write.
    pub fn in_config(self, config_name: impl Into<String>, section_name: impl Into<String>) -> Self {
        self.with_config_name(config_name).with_section(section_name)
    }

    /// Sets the config file name alone.
    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.config_name = Some(config_name.into());
        self
    }

    /// Sets the config section alone.
    pub fn with_section(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = Some(section_name.into());
        self
    }

    /// Attaches the handler run on invocation.
    pub fn on_invoke(
        mut self,
        handler: impl FnMut(&Invocation<'_>) -> HandlerResult + 'static,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Native value.
    pub fn get(&self) -> &T {
        &self.native
    }

    /// Replaces the native value and re-encodes the projection.
    pub fn set(&mut self, value: T) {
        self.projection = value.encode();
        self.native = value;
    }

    /// `(config, section)` when both are present and non-empty.
    pub fn config_binding(&self) -> Option<(&str, &str)> {
        let config = self.config_name.as_deref().filter(|c| !c.is_empty())?;
        let section = self.section_name.as_deref().filter(|s| !s.is_empty())?;
        Some((config, section))
    }
}

impl<T: VariableType> Variable for TypedVariable<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &Value {
        &self.projection
    }

    fn set_value(&mut self, value: Value) {
        if value.kind() != T::KIND {
            debug!(
                variable = %self.name,
                from = %value.kind(),
                to = any::type_name::<T>(),
                "Converting value to the variable's type"
            );
        }
        self.set(T::decode(&value));
    }

    fn set_from_str(&mut self, text: &str) {
        self.set(T::from_text(text));
    }

    fn compare(&self, value: &Value) -> bool {
        self.projection.equals(value)
    }

    fn value_kind(&self) -> ValueKind {
        T::KIND
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn config_name(&self) -> Option<&str> {
        self.config_name.as_deref()
    }

    fn section_name(&self) -> Option<&str> {
        self.section_name.as_deref()
    }

    fn invoke(&mut self, args: &[Value]) {
        let invocation = Invocation {
            name: &self.name,
            args,
            value: Some(&self.projection),
        };
        run_handler(self.handler.as_mut(), &invocation);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: VariableType> fmt::Display for TypedVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.projection)
    }
}

impl<T: VariableType> fmt::Debug for TypedVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedVariable")
            .field("name", &self.name)
            .field("value", &self.native)
            .field("config_name", &self.config_name)
            .field("section_name", &self.section_name)
            .finish_non_exhaustive()
    }
}
