//! Structured violation records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::report::format_report;
use crate::contracts::FieldType;
use crate::value::Value;

/// Field name used when the requested contract does not exist.
pub const CONTRACT_FIELD: &str = "_contract";

/// Field name used when the input is not a map at all.
pub const ROOT_FIELD: &str = "_root";

/// Machine-readable category of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The contract name did not resolve.
    ContractNotFound,
    /// The input was not a map.
    InvalidRoot,
    /// A required field was absent.
    Required,
    /// A field value had the wrong type.
    TypeMismatch,
    /// A string did not match its format.
    Format,
    /// A string was too short.
    MinLength,
    /// A string was too long.
    MaxLength,
    /// A number was below its minimum.
    Min,
    /// A number was above its maximum.
    Max,
    /// A value was not in its allowed set.
    OneOf,
    /// A list item had the wrong type.
    ItemType,
}

impl ViolationKind {
    /// Stable snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractNotFound => "contract_not_found",
            Self::InvalidRoot => "invalid_root",
            Self::Required => "required",
            Self::TypeMismatch => "type_mismatch",
            Self::Format => "format",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Min => "min",
            Self::Max => "max",
            Self::OneOf => "one_of",
            Self::ItemType => "item_type",
        }
    }
}

/// One way in which data failed to satisfy a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The offending field.
    pub field: String,
    /// Human-readable message, e.g. `is required`.
    pub error: String,
    /// Enclosing field names from the root, not including `field`.
    pub path: Vec<String>,
    /// Category of the violation.
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a top-level violation.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ViolationKind, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
            path: Vec::new(),
            kind,
        }
    }

    /// Sets the enclosing path.
    #[must_use]
    pub fn with_path(mut self, path: &[String]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub(crate) fn contract_not_found(name: &str) -> Self {
        Self::new(
            CONTRACT_FIELD,
            ViolationKind::ContractNotFound,
            format!("contract '{name}' not found"),
        )
    }

    pub(crate) fn invalid_root(data: &Value) -> Self {
        Self::new(
            ROOT_FIELD,
            ViolationKind::InvalidRoot,
            format!("expected a map, got {}", data.type_name()),
        )
    }

    pub(crate) fn required(field: &str) -> Self {
        Self::new(field, ViolationKind::Required, "is required")
    }

    pub(crate) fn type_mismatch(field: &str, expected: &FieldType, actual: &Value) -> Self {
        Self::new(
            field,
            ViolationKind::TypeMismatch,
            format!("must be of type {expected}, got {}", actual.type_name()),
        )
    }

    pub(crate) fn item_type(field: &str, expected: &FieldType, actual: &Value) -> Self {
        Self::new(
            field,
            ViolationKind::ItemType,
            format!("all items must be of type {expected}, got {}", actual.type_name()),
        )
    }

    /// Dotted location: `parent.child.field`, or just `field` at the top level.
    #[must_use]
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            self.field.clone()
        } else {
            format!("{}.{}", self.path.join("."), self.field)
        }
    }

    /// True for the `_contract` violation, which signals a bad contract
    /// reference rather than bad data.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        self.kind == ViolationKind::ContractNotFound
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.error)
    }
}

/// A non-empty, ordered list of violations.
///
/// This is the error side of a validation result. It can only be built
/// from at least one violation, so a failed validation always explains
/// itself. `Display` renders the report from [`format_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Wraps a list, or returns `None` if it is empty.
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self(violations))
        }
    }

    /// A list holding exactly one violation.
    #[must_use]
    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    /// Number of violations, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// The violations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Unwraps into the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    /// Violations reported for a field name, at any depth.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// True if any violation names this field.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// True if validation never reached the data because the contract was missing.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        self.0.iter().any(Violation::is_configuration_error)
    }

    /// The human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        format_report(&self.0)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_report(&self.0))
    }
}

impl std::error::Error for Violations {}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
