use std::fmt;

use super::{Value, Vec2, Vec3};

impl<T: fmt::Display> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Vec3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Canonical human-readable form.
///
/// Vectors are comma-joined without spaces and floats always carry a
/// fractional part or exponent (`2.0`, `1e20`), so a formatted number or
/// vector parses back through [`Value::parse`] with the same tag.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => f.write_str(s),
            Value::Name(n) => write!(f, "{n}"),
            Value::Vec2i(v) => write!(f, "{v}"),
            Value::Vec2f(v) => write!(f, "{:?},{:?}", v.x, v.y),
            Value::Vec3i(v) => write!(f, "{v}"),
            Value::Vec3f(v) => write!(f, "{:?},{:?},{:?}", v.x, v.y, v.z),
        }
    }
}
