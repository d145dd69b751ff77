use std::{convert::Infallible, str::FromStr};

use super::{Value, Vec2, Vec3};

impl Value {
    /// Infers a value from free text.
    ///
    /// The text is split on commas and empty segments are dropped, so
    /// `"1,2,"` reads the same as `"1,2"` and `"10,"` is the integer `10`.
    ///
    /// A single segment is tried as an integer, then a float, then a boolean
    /// (`true`/`false`, any case), and is kept as a string otherwise. Two or
    /// three segments become an integer vector when every segment is an
    /// integer and a float vector when every segment is a number. When only
    /// some segments are numeric the rest are left at zero. Text with more
    /// than three segments, or with no numeric segment at all, stays a string:
    /// `"a,b"` is the string `"a,b"`, not a zero vector.
    ///
    /// Parsing never fails.
    pub fn parse(text: &str) -> Value {
        let trimmed = text.trim();
        let tokens: Vec<&str> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        match tokens.as_slice() {
            [token] => parse_scalar(token),
            [_, _] | [_, _, _] => {
                parse_vector(&tokens).unwrap_or_else(|| Value::String(trimmed.to_string()))
            }
            _ => Value::String(trimmed.to_string()),
        }
    }
}

impl FromStr for Value {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Value::parse(text))
    }
}

/// Case-insensitive `true`/`false`.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_scalar(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Int(i);
    }

    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }

    if let Some(b) = parse_bool(token) {
        return Value::Bool(b);
    }

    Value::String(token.to_string())
}

fn parse_vector(tokens: &[&str]) -> Option<Value> {
    let ints: Vec<Option<i64>> = tokens.iter().map(|token| token.parse().ok()).collect();
    let floats: Vec<Option<f64>> = tokens.iter().map(|token| token.parse().ok()).collect();

    if floats.iter().all(Option::is_none) {
        return None;
    }

    let fractional = ints
        .iter()
        .zip(&floats)
        .any(|(int, float)| int.is_none() && float.is_some());

    if fractional {
        let components: Vec<f64> = floats.into_iter().map(Option::unwrap_or_default).collect();
        match components.as_slice() {
            [x, y] => Some(Value::Vec2f(Vec2::new(*x, *y))),
            [x, y, z] => Some(Value::Vec3f(Vec3::new(*x, *y, *z))),
            _ => None,
        }
    } else {
        let components: Vec<i64> = ints.into_iter().map(Option::unwrap_or_default).collect();
        match components.as_slice() {
            [x, y] => Some(Value::Vec2i(Vec2::new(*x, *y))),
            [x, y, z] => Some(Value::Vec3i(Vec3::new(*x, *y, *z))),
            _ => None,
        }
    }
}
