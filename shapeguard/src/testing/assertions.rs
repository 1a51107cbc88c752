//! Test assertions for validation results.

use crate::validation::{Violation, Violations};
use crate::value::Value;

/// Asserts that validation succeeded.
pub fn assert_valid(result: &Result<Value, Violations>) {
    if let Err(violations) = result {
        panic!("Expected valid data, got {violations}");
    }
}

/// Asserts that validation failed and returns the violations.
pub fn assert_invalid(result: &Result<Value, Violations>) -> &Violations {
    match result {
        Ok(data) => panic!("Expected violations, but data was valid: {data}"),
        Err(violations) => violations,
    }
}

/// Asserts that the result contains a violation for `field` with `error`.
pub fn assert_violation<'a>(
    result: &'a Result<Value, Violations>,
    field: &str,
    error: &str,
) -> &'a Violation {
    let violations = assert_invalid(result);
    violations
        .iter()
        .find(|v| v.field == field && v.error == error)
        .unwrap_or_else(|| {
            panic!("Expected violation '{field}: {error}', got {violations}")
        })
}

/// Asserts a violation at a dotted location, e.g. `address.zip`.
pub fn assert_violation_at<'a>(
    result: &'a Result<Value, Violations>,
    location: &str,
) -> &'a Violation {
    let violations = assert_invalid(result);
    violations
        .iter()
        .find(|v| v.location() == location)
        .unwrap_or_else(|| panic!("Expected a violation at '{location}', got {violations}"))
}

/// Asserts the exact number of violations.
pub fn assert_violation_count(result: &Result<Value, Violations>, expected: usize) {
    let violations = assert_invalid(result);
    assert_eq!(
        violations.len(),
        expected,
        "Expected {expected} violation(s), got {violations}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{Contract, Field, FieldType};
    use serde_json::json;

    fn contract() -> Contract {
        Contract::new(
            "user",
            vec![
                Field::required("name", FieldType::String),
                Field::required_map("address", vec![Field::required("zip", FieldType::String)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assert_valid() {
        let result = contract().validate(Value::from(json!({"name": "a", "address": {"zip": "1"}})));
        assert_valid(&result);
    }

    #[test]
    #[should_panic(expected = "Expected valid data")]
    fn test_assert_valid_fails() {
        let result = contract().validate(Value::from(json!({})));
        assert_valid(&result);
    }

    #[test]
    fn test_assert_violation() {
        let result = contract().validate(Value::from(json!({"address": {}})));
        let violation = assert_violation(&result, "name", "is required");
        assert!(violation.path.is_empty());
        assert_violation_at(&result, "address.zip");
        assert_violation_count(&result, 2);
    }

    #[test]
    #[should_panic(expected = "Expected violations")]
    fn test_assert_invalid_fails() {
        let result = contract().validate(Value::from(json!({"name": "a", "address": {"zip": "1"}})));
        assert_invalid(&result);
    }

    #[test]
    #[should_panic(expected = "Expected a violation at 'address.city'")]
    fn test_assert_violation_at_fails() {
        let result = contract().validate(Value::from(json!({"address": {}})));
        assert_violation_at(&result, "address.city");
    }
}
