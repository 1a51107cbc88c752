//! Runtime type predicates.

use crate::contracts::FieldType;
use crate::value::Value;

/// True if `value` has the runtime type `field_type` describes.
///
/// No coercion: `"18"` is not an integer and `1` is not a float.
/// `ListOf` only confirms the value is a list; item types are checked by
/// the engine so it can report them against the field.
#[must_use]
pub const fn check_type(field_type: &FieldType, value: &Value) -> bool {
    matches!(
        (field_type, value),
        (FieldType::String, Value::String(_))
            | (FieldType::Integer, Value::Integer(_))
            | (FieldType::Float, Value::Float(_))
            | (FieldType::Boolean, Value::Bool(_))
            | (FieldType::Atom, Value::Atom(_))
            | (FieldType::Map, Value::Map(_))
            | (FieldType::List | FieldType::ListOf(_), Value::List(_))
    )
}
