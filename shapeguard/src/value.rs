//! Dynamically shaped runtime values.
//!
//! `Value` is the data model the validation engine walks. It mirrors JSON
//! but keeps atoms (symbol-like scalars) distinct from strings, since a
//! contract can require one and reject the other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Absence of a value.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A whole number.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A symbol-like scalar, distinct from a string.
    Atom(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A key-value structure keyed by identifier.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Creates an atom.
    #[must_use]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Creates a map from key-value pairs.
    #[must_use]
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a list from values.
    #[must_use]
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::List(items.into_iter().collect())
    }

    /// Returns the runtime type label used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "nil",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Atom(_) => "atom",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the map if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// True for integers and floats.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Atom(a) => write!(f, ":{a}"),
            Self::List(_) | Self::Map(_) => {
                write!(f, "{}", serde_json::Value::from(self.clone()))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Integer(i) => Self::from(i),
            // Non-finite floats have no JSON form.
            Value::Float(x) => serde_json::Number::from_f64(x).map_or(Self::Null, Self::Number),
            Value::String(s) | Value::Atom(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Map(map) => Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Integer(42));
        assert_eq!(Value::from(json!(-3)), Value::Integer(-3));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
    }

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({"user": {"tags": ["a", "b"]}}));
        let tags = value.get("user").and_then(|u| u.get("tags")).unwrap();
        assert_eq!(tags.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_atom_distinct_from_string() {
        assert_ne!(Value::atom("admin"), Value::from("admin"));
        assert_eq!(Value::atom("admin").type_name(), "atom");
        assert_eq!(Value::from("admin").type_name(), "string");
    }

    #[test]
    fn test_integer_not_equal_to_float() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
    }

    #[test]
    fn test_atom_serializes_as_string() {
        let json = serde_json::to_value(Value::atom("admin")).unwrap();
        assert_eq!(json, json!("admin"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::atom("ok").to_string(), ":ok");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::list(vec![Value::Integer(1)]).to_string(), "[1]");
    }

    #[test]
    fn test_map_constructor() {
        let value = Value::map([("a", Value::Integer(1)), ("b", Value::Bool(true))]);
        assert_eq!(value.get("a"), Some(&Value::Integer(1)));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::Integer(1).get("a"), None);
    }
}
