//! Field descriptors and type descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constraint::{Constraint, Number};
use crate::errors::ContractResult;
use crate::value::Value;

/// The declared type of a field.
///
/// Serialized in snake case: `"string"`, `"integer"`, `{"list_of": "string"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A string.
    String,
    /// A whole number (floats are rejected).
    Integer,
    /// A floating-point number (integers are rejected).
    Float,
    /// Exactly `true` or `false`.
    Boolean,
    /// A symbol-like scalar.
    Atom,
    /// A key-value structure.
    Map,
    /// A sequence of anything.
    List,
    /// A sequence whose items have the given type.
    ListOf(Box<FieldType>),
}

impl FieldType {
    /// Creates a `ListOf` descriptor.
    #[must_use]
    pub fn list_of(item: Self) -> Self {
        Self::ListOf(Box::new(item))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Atom => write!(f, "atom"),
            Self::Map => write!(f, "map"),
            Self::List => write!(f, "list"),
            Self::ListOf(item) => write!(f, "list_of({item})"),
        }
    }
}

/// One named entry in a contract.
///
/// Fields are immutable once a [`super::Contract`] is built from them.
/// The builder methods consume and return `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<Constraint>,
    #[serde(default, rename = "fields", skip_serializing_if = "Option::is_none")]
    nested_fields: Option<Vec<Field>>,
}

impl Field {
    fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            constraints: Vec::new(),
            nested_fields: None,
        }
    }

    /// A field that must be present.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, true)
    }

    /// A field that may be absent.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }

    /// A required map field with a nested shape.
    ///
    /// An empty `fields` list accepts any map.
    #[must_use]
    pub fn required_map(name: impl Into<String>, fields: Vec<Self>) -> Self {
        Self {
            nested_fields: Some(fields),
            ..Self::new(name, FieldType::Map, true)
        }
    }

    /// An optional map field with a nested shape.
    #[must_use]
    pub fn optional_map(name: impl Into<String>, fields: Vec<Self>) -> Self {
        Self {
            nested_fields: Some(fields),
            ..Self::new(name, FieldType::Map, false)
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends a format constraint.
    pub fn format(self, pattern: &str) -> ContractResult<Self> {
        Ok(self.constraint(Constraint::format(pattern)?))
    }

    /// Appends a minimum length constraint.
    #[must_use]
    pub fn min_length(self, n: usize) -> Self {
        self.constraint(Constraint::MinLength(n))
    }

    /// Appends a maximum length constraint.
    #[must_use]
    pub fn max_length(self, n: usize) -> Self {
        self.constraint(Constraint::MaxLength(n))
    }

    /// Appends an inclusive lower bound.
    #[must_use]
    pub fn min(self, n: impl Into<Number>) -> Self {
        self.constraint(Constraint::Min(n.into()))
    }

    /// Appends an inclusive upper bound.
    #[must_use]
    pub fn max(self, n: impl Into<Number>) -> Self {
        self.constraint(Constraint::Max(n.into()))
    }

    /// Appends an enumeration constraint.
    #[must_use]
    pub fn one_of<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraint(Constraint::OneOf(values.into_iter().map(Into::into).collect()))
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Whether absence is a violation.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Constraints in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Nested shape for map fields, if declared.
    #[must_use]
    pub fn nested_fields(&self) -> Option<&[Self]> {
        self.nested_fields.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::String.to_string(), "string");
        assert_eq!(
            FieldType::list_of(FieldType::list_of(FieldType::Integer)).to_string(),
            "list_of(list_of(integer))"
        );
    }

    #[test]
    fn test_field_type_serde() {
        let t: FieldType = serde_json::from_value(json!({"list_of": "string"})).unwrap();
        assert_eq!(t, FieldType::list_of(FieldType::String));
        assert_eq!(serde_json::to_value(FieldType::Boolean).unwrap(), json!("boolean"));
    }

    #[test]
    fn test_builder_keeps_constraint_order() {
        let field = Field::required("name", FieldType::String)
            .min_length(2)
            .format("^[a-z]+$")
            .unwrap()
            .max_length(10);

        let names: Vec<_> = field.constraints().iter().map(Constraint::name).collect();
        assert_eq!(names, vec!["min_length", "format", "max_length"]);
        assert!(field.is_required());
        assert!(field.nested_fields().is_none());
    }

    #[test]
    fn test_map_field_has_nested() {
        let field = Field::optional_map("address", vec![Field::required("zip", FieldType::String)]);
        assert_eq!(field.field_type(), &FieldType::Map);
        assert!(!field.is_required());
        assert_eq!(field.nested_fields().map(<[Field]>::len), Some(1));
    }

    #[test]
    fn test_field_deserialize_defaults() {
        let field: Field = serde_json::from_value(json!({"name": "age", "type": "integer"})).unwrap();
        assert!(!field.is_required());
        assert!(field.constraints().is_empty());
        assert!(field.nested_fields().is_none());
    }

    #[test]
    fn test_one_of_values() {
        let field = Field::required("role", FieldType::Atom).one_of([Value::atom("admin"), Value::atom("user")]);
        assert_eq!(
            field.constraints(),
            &[Constraint::OneOf(vec![Value::atom("admin"), Value::atom("user")])]
        );
    }
}
