//! Constraint variants attached to contract fields.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::FieldType;
use crate::errors::{ContractError, ContractResult};
use crate::value::Value;

/// A compiled format pattern.
///
/// Compiled once when the contract is built; equality compares the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> ContractResult<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| ContractError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// True if the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for Pattern {
    type Error = ContractError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(&pattern)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.as_str().to_string()
    }
}

/// A numeric bound for `min`/`max` constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// An integer bound.
    Integer(i64),
    /// A floating-point bound.
    Float(f64),
}

impl Number {
    /// Orders a numeric value against this bound.
    ///
    /// Returns `None` for non-numeric values and for NaN.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(self, value: &Value) -> Option<Ordering> {
        match (value, self) {
            (Value::Integer(v), Self::Integer(b)) => Some(v.cmp(&b)),
            (Value::Integer(v), Self::Float(b)) => (*v as f64).partial_cmp(&b),
            (Value::Float(v), Self::Integer(b)) => v.partial_cmp(&(b as f64)),
            (Value::Float(v), Self::Float(b)) => v.partial_cmp(&b),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// A predicate applied to a field value after its type check passes.
///
/// Serialized as a single-key object, e.g. `{"min_length": 3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// The string must match the pattern.
    Format(Pattern),
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Inclusive numeric lower bound.
    Min(Number),
    /// Inclusive numeric upper bound.
    Max(Number),
    /// The value must equal one of these.
    OneOf(Vec<Value>),
}

impl Constraint {
    /// Creates a format constraint, compiling the pattern.
    pub fn format(pattern: &str) -> ContractResult<Self> {
        Pattern::new(pattern).map(Self::Format)
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::OneOf(_) => "one_of",
        }
    }

    /// True if this constraint can ever be evaluated for values of `field_type`.
    #[must_use]
    pub const fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Self::Format(_) | Self::MinLength(_) | Self::MaxLength(_) => {
                matches!(field_type, FieldType::String)
            }
            Self::Min(_) | Self::Max(_) => {
                matches!(field_type, FieldType::Integer | FieldType::Float)
            }
            Self::OneOf(_) => true,
        }
    }
}
