//! Cell values and their CSV rendering

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Declared kind of a column
///
/// The kind only affects how values are rendered; values are never coerced
/// or rejected because of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Render each value according to its own type
    #[default]
    Auto,
    /// Whole numbers
    Integer,
    /// Floating point numbers; integer values are rendered with a trailing `.0`
    Float,
    /// `True` / `False`
    Boolean,
    /// Free text
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Auto => "auto",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
        };
        f.write_str(s)
    }
}

/// A single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Renders the value as a CSV field for a column of the given kind
    ///
    /// Missing values and NaN become empty fields.
    ///
    /// ```
    /// use tablecast::domain::{ColumnKind, Value};
    ///
    /// assert_eq!(Value::Int(3).render(ColumnKind::Float), "3.0");
    /// assert_eq!(Value::Bool(true).render(ColumnKind::Auto), "True");
    /// assert_eq!(Value::Null.render(ColumnKind::Text), "");
    /// ```
    pub fn render(&self, kind: ColumnKind) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("True"),
            Value::Bool(false) => Cow::Borrowed("False"),
            Value::Int(i) if kind == ColumnKind::Float => Cow::Owned(format_float(*i as f64)),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(format_float(*f)),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Returns true for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Shortest round-trip form, keeping a `.0` on integral values
///
/// Magnitudes below `1e-4` or at `1e16` and above switch to exponent form
/// (`1e+16`, `1e-05`) so the field still reads back as a float.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return String::new();
    }
    if f.is_infinite() {
        let s = if f > 0.0 { "inf" } else { "-inf" };
        return s.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa and its decimal exponent
    let sci = format!("{f:e}");
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if f != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}
