use std::fmt;

use super::{Name, Value, ValueKind, Vec2, Vec2f, Vec2i, Vec3, Vec3f, Vec3i};

mod sealed {
    pub trait Sealed {}
}

/// Native types a console variable may hold.
///
/// The set is closed: the trait is sealed, so a variable of any other type
/// is rejected by the compiler. Each type maps onto one [`ValueKind`].
///
/// `decode` is total. A value of a different tag is converted where the
/// conversion is meaningful (numbers between each other, text through
/// [`Value::parse`]) and falls back to the type's default otherwise.
/// Integers narrower than `i64` saturate. A `u64` above `i64::MAX` is stored
/// as `i64::MAX` in its [`Value`], while text is read with the full `u64`
/// range and negative input reads as zero.
pub trait VariableType: sealed::Sealed + Clone + PartialEq + fmt::Debug + 'static {
    /// Tag of the encoded value.
    const KIND: ValueKind;

    /// Projects the native value onto its canonical [`Value`].
    fn encode(&self) -> Value;

    /// Reads a native value back out of a [`Value`].
    fn decode(value: &Value) -> Self;

    /// Reads a native value from raw text.
    fn from_text(text: &str) -> Self {
        Self::decode(&Value::parse(text))
    }
}

/// Re-infers text held in a string value, ignoring text that stays text.
fn reparse(text: &str) -> Option<Value> {
    match Value::parse(text) {
        Value::String(_) => None,
        value => Some(value),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_i64(value: &Value) -> i64 {
    match value {
        Value::Int(i) => *i,
        Value::Float(f) => *f as i64,
        Value::Bool(b) => i64::from(*b),
        Value::String(_) | Value::Name(_) => value
            .as_str()
            .and_then(reparse)
            .map_or(0, |parsed| to_i64(&parsed)),
        _ => 0,
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: &Value) -> f64 {
    match value {
        Value::Float(f) => *f,
        Value::Int(i) => *i as f64,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(_) | Value::Name(_) => value
            .as_str()
            .and_then(reparse)
            .map_or(0.0, |parsed| to_f64(&parsed)),
        _ => 0.0,
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(_) | Value::Name(_) => value
            .as_str()
            .and_then(reparse)
            .is_some_and(|parsed| to_bool(&parsed)),
        _ => false,
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl VariableType for $ty {
            const KIND: ValueKind = ValueKind::Int;

            fn encode(&self) -> Value {
                Value::Int(i64::from(*self))
            }

            fn decode(value: &Value) -> Self {
                let wide = to_i64(value);
                <$ty>::try_from(wide).unwrap_or(if wide < 0 { <$ty>::MIN } else { <$ty>::MAX })
            }
        }

        impl From<$ty> for Value {
            fn from(native: $ty) -> Self {
                native.encode()
            }
        }
    )*};
}

narrow_integer!(u8, u16, u32, i16, i32);

macro_rules! sealed_from {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl From<$ty> for Value {
            fn from(native: $ty) -> Self {
                native.encode()
            }
        }
    )*};
}

sealed_from!(bool, i64, u64, f32, f64, String, Name, Vec2i, Vec2f, Vec3i, Vec3f);

impl VariableType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn encode(&self) -> Value {
        Value::Bool(*self)
    }

    fn decode(value: &Value) -> Self {
        to_bool(value)
    }
}

impl VariableType for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn encode(&self) -> Value {
        Value::Int(*self)
    }

    fn decode(value: &Value) -> Self {
        to_i64(value)
    }
}

impl VariableType for u64 {
    const KIND: ValueKind = ValueKind::Int;

    fn encode(&self) -> Value {
        Value::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn decode(value: &Value) -> Self {
        match value {
            Value::Int(i) => u64::try_from(*i).unwrap_or(0),
            // `as` saturates at both ends and maps NaN to zero.
            Value::Float(f) => *f as u64,
            Value::String(_) | Value::Name(_) => {
                let text = value.as_str().unwrap_or_default();
                text.trim()
                    .parse::<u64>()
                    .unwrap_or_else(|_| reparse(text).map_or(0, |parsed| Self::decode(&parsed)))
            }
            other => u64::try_from(to_i64(other)).unwrap_or(0),
        }
    }

    fn from_text(text: &str) -> Self {
        Self::decode(&Value::String(text.to_string()))
    }
}

impl VariableType for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn encode(&self) -> Value {
        Value::Float(*self)
    }

    fn decode(value: &Value) -> Self {
        to_f64(value)
    }
}

impl VariableType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn encode(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn decode(value: &Value) -> Self {
        to_f64(value) as f32
    }
}

impl VariableType for String {
    const KIND: ValueKind = ValueKind::String;

    fn encode(&self) -> Value {
        Value::String(self.clone())
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::None => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn from_text(text: &str) -> Self {
        text.to_string()
    }
}

impl VariableType for Name {
    const KIND: ValueKind = ValueKind::Name;

    fn encode(&self) -> Value {
        Value::Name(self.clone())
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::None => Name::default(),
            Value::Name(n) => n.clone(),
            Value::String(s) => Name::new(s),
            other => Name::from(other.to_string()),
        }
    }

    fn from_text(text: &str) -> Self {
        Name::new(text)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl VariableType for Vec2i {
    const KIND: ValueKind = ValueKind::Vec2i;

    fn encode(&self) -> Value {
        Value::Vec2i(*self)
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::Vec2i(v) => *v,
            Value::Vec2f(v) => Vec2::new(v.x as i64, v.y as i64),
            Value::String(s) => reparse(s).map_or_else(Vec2::default, |parsed| Self::decode(&parsed)),
            _ => Vec2::default(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
impl VariableType for Vec2f {
    const KIND: ValueKind = ValueKind::Vec2f;

    fn encode(&self) -> Value {
        Value::Vec2f(*self)
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::Vec2f(v) => *v,
            Value::Vec2i(v) => Vec2::new(v.x as f64, v.y as f64),
            Value::String(s) => reparse(s).map_or_else(Vec2::default, |parsed| Self::decode(&parsed)),
            _ => Vec2::default(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
impl VariableType for Vec3i {
    const KIND: ValueKind = ValueKind::Vec3i;

    fn encode(&self) -> Value {
        Value::Vec3i(*self)
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::Vec3i(v) => *v,
            Value::Vec3f(v) => Vec3::new(v.x as i64, v.y as i64, v.z as i64),
            Value::String(s) => reparse(s).map_or_else(Vec3::default, |parsed| Self::decode(&parsed)),
            _ => Vec3::default(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
impl VariableType for Vec3f {
    const KIND: ValueKind = ValueKind::Vec3f;

    fn encode(&self) -> Value {
        Value::Vec3f(*self)
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::Vec3f(v) => *v,
            Value::Vec3i(v) => Vec3::new(v.x as f64, v.y as f64, v.z as f64),
            Value::String(s) => reparse(s).map_or_else(Vec3::default, |parsed| Self::decode(&parsed)),
            _ => Vec3::default(),
        }
    }
}
