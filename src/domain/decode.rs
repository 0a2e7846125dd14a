// Field-bag decoding primitives shared by the console and every item variant
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::FieldError;

/// Untyped key/value bag as supplied by the dashboard backend.
pub type FieldBag = Map<String, Value>;

/// Parses an integer the way the backend encodes them: JSON numbers are
/// truncated toward zero, strings contribute their leading `[+-]?digits`
/// prefix (`"12px"` is 12). Anything else is unparseable.
pub fn parse_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Permissive boolean coercion. This is not a type check: `true`, any
/// number above zero and the strings `"1"`/`"true"` (case-insensitive)
/// are truthy, every other value silently decodes as `false`.
pub fn parse_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f > 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

/// Absent, `null` and `""` all collapse into `None`.
pub fn not_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn required_int(bag: &FieldBag, field: &'static str) -> Result<i64, FieldError> {
    parse_int(bag.get(field)).ok_or(FieldError::Invalid(field))
}

pub fn optional_int(bag: &FieldBag, field: &str) -> Option<i64> {
    parse_int(bag.get(field))
}

pub fn required_string(bag: &FieldBag, field: &'static str) -> Result<String, FieldError> {
    not_empty_string(bag.get(field)).ok_or(FieldError::Invalid(field))
}

pub fn optional_string(bag: &FieldBag, field: &str) -> Option<String> {
    not_empty_string(bag.get(field))
}

pub fn flag(bag: &FieldBag, field: &str) -> bool {
    parse_bool(bag.get(field))
}

/// Dimensions of anything sizeable: the console surface and every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn decode(bag: &FieldBag) -> Result<Self, FieldError> {
        Ok(Self {
            width: dimension(bag, "width")?,
            height: dimension(bag, "height")?,
        })
    }
}

fn dimension(bag: &FieldBag, field: &'static str) -> Result<u32, FieldError> {
    let value = required_int(bag, field)?;
    if value < 0 {
        return Err(FieldError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| FieldError::Invalid(field))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn decode(bag: &FieldBag) -> Self {
        Self {
            x: optional_int(bag, "x").unwrap_or(0),
            y: optional_int(bag, "y").unwrap_or(0),
        }
    }
}
