//! Property value type for compounds and reaction edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single property value.
///
/// The set is deliberately closed and flat:
/// - Scalars: Null, Bool, Int, Float, String
/// - Containers: List (of strings only)
///
/// Nested maps are rejected at the conversion boundary, see [`Value::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::List(_) => "LIST<STRING>",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }
    pub fn is_string(&self) -> bool { matches!(self, Value::String(_)) }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

// ============================================================================
// JSON boundary
// ============================================================================

impl Value {
    /// Convert a JSON value into a property value.
    ///
    /// `key` only feeds the error message. Objects and lists holding anything
    /// other than strings are rejected with `InvalidArgument`.
    pub fn from_json(key: &str, json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    Error::InvalidArgument(format!("property '{key}': number {n} is not representable"))
                }),
            },
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Json::String(s) => Ok(s),
                    other => Err(Error::InvalidArgument(format!(
                        "property '{key}': lists may only contain strings, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Json::Object(_) => Err(Error::InvalidArgument(format!(
                "property '{key}': nested maps are not supported"
            ))),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<Vec<String>> for Value { fn from(v: Vec<String>) -> Self { Value::List(v) } }
impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self { Value::List(v.into_iter().map(str::to_owned).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "\"{}\"", v.replace('"', "\\\""))?;
                }
                write!(f, "]")
            }
        }
    }
}
