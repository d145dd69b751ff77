//! Dynamically-typed values carried by console arguments and variables.
//!
//! A [`Value`] holds exactly one of a closed set of primitive and vector
//! types. Values are produced from typed natives through [`VariableType`]
//! or inferred from free text with [`Value::parse`].

mod convert;
mod display;
mod parse;


use std::{fmt, sync::Arc};

pub use convert::VariableType;

/// Two-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2<T> {
    /// First component.
    pub x: T,
    /// Second component.
    pub y: T,
}

impl<T> Vec2<T> {
    /// Creates a vector from its components.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec3<T> {
    /// First component.
    pub x: T,
    /// Second component.
    pub y: T,
    /// Third component.
    pub z: T,
}

impl<T> Vec3<T> {
    /// Creates a vector from its components.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

/// 2D integer vector.
pub type Vec2i = Vec2<i64>;
/// 2D float vector.
pub type Vec2f = Vec2<f64>;
/// 3D integer vector.
pub type Vec3i = Vec3<i64>;
/// 3D float vector.
pub type Vec3f = Vec3<f64>;

/// An immutable, cheaply clonable identifier string.
///
/// Names compare by content. They are kept distinct from plain strings so a
/// variable declared as a `Name` never equals one holding the same text as a
/// `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Creates a name from any string-like value.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged value holding exactly one supported type.
///
/// Equality requires identical tags: `Int(1)` never equals `Float(1.0)`.
/// Float components compare exactly.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Identifier name.
    Name(Name),
    /// 2D integer vector.
    Vec2i(Vec2i),
    /// 2D float vector.
    Vec2f(Vec2f),
    /// 3D integer vector.
    Vec3i(Vec3i),
    /// 3D float vector.
    Vec3f(Vec3f),
}

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::None`]
    None,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Name`]
    Name,
    /// [`Value::Vec2i`]
    Vec2i,
    /// [`Value::Vec2f`]
    Vec2f,
    /// [`Value::Vec3i`]
    Vec3i,
    /// [`Value::Vec3f`]
    Vec3f,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::None => "none",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Name => "name",
            ValueKind::Vec2i => "vec2i",
            ValueKind::Vec2f => "vec2f",
            ValueKind::Vec3i => "vec3i",
            ValueKind::Vec3f => "vec3f",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Returns the active tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Name(_) => ValueKind::Name,
            Value::Vec2i(_) => ValueKind::Vec2i,
            Value::Vec2f(_) => ValueKind::Vec2f,
            Value::Vec3i(_) => ValueKind::Vec3i,
            Value::Vec3f(_) => ValueKind::Vec3f,
        }
    }

    /// Tag-strict equality. Same as `==`.
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    /// Returns `true` for [`Value::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text of a [`Value::String`] or [`Value::Name`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Name(n) => Some(n.as_str()),
            _ => None,
        }
    }

    /// Returns the name if this is a [`Value::Name`].
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Value::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the vector if this is a [`Value::Vec2i`].
    pub fn as_vec2i(&self) -> Option<Vec2i> {
        match self {
            Value::Vec2i(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the vector if this is a [`Value::Vec2f`].
    pub fn as_vec2f(&self) -> Option<Vec2f> {
        match self {
            Value::Vec2f(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the vector if this is a [`Value::Vec3i`].
    pub fn as_vec3i(&self) -> Option<Vec3i> {
        match self {
            Value::Vec3i(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the vector if this is a [`Value::Vec3f`].
    pub fn as_vec3f(&self) -> Option<Vec3f> {
        match self {
            Value::Vec3f(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}
