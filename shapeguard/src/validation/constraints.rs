//! Constraint predicates.

use std::cmp::Ordering;

use super::violation::ViolationKind;
use crate::contracts::Constraint;
use crate::value::Value;

/// Why a value failed a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintFailure {
    /// Category of the failure.
    pub kind: ViolationKind,
    /// Message for the violation.
    pub message: String,
}

impl ConstraintFailure {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks one constraint against a value.
///
/// A constraint whose value type does not match (e.g. `min_length` on an
/// integer) is not evaluated and passes.
pub fn check_constraint(constraint: &Constraint, value: &Value) -> Result<(), ConstraintFailure> {
    match (constraint, value) {
        (Constraint::Format(pattern), Value::String(s)) => {
            if pattern.is_match(s) {
                Ok(())
            } else {
                Err(ConstraintFailure::new(ViolationKind::Format, "does not match format"))
            }
        }
        (Constraint::MinLength(n), Value::String(s)) => {
            if s.chars().count() >= *n {
                Ok(())
            } else {
                Err(ConstraintFailure::new(
                    ViolationKind::MinLength,
                    format!("must be at least {n} characters (minimum length)"),
                ))
            }
        }
        (Constraint::MaxLength(n), Value::String(s)) => {
            if s.chars().count() <= *n {
                Ok(())
            } else {
                Err(ConstraintFailure::new(
                    ViolationKind::MaxLength,
                    format!("must be at most {n} characters (maximum length)"),
                ))
            }
        }
        (Constraint::Min(bound), Value::Integer(_) | Value::Float(_)) => {
            match bound.compare(value) {
                Some(Ordering::Less) => Err(ConstraintFailure::new(
                    ViolationKind::Min,
                    format!("must be >= {bound} (minimum value)"),
                )),
                _ => Ok(()),
            }
        }
        (Constraint::Max(bound), Value::Integer(_) | Value::Float(_)) => {
            match bound.compare(value) {
                Some(Ordering::Greater) => Err(ConstraintFailure::new(
                    ViolationKind::Max,
                    format!("must be <= {bound} (maximum value)"),
                )),
                _ => Ok(()),
            }
        }
        (Constraint::OneOf(allowed), _) => {
            if allowed.contains(value) {
                Ok(())
            } else {
                let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                Err(ConstraintFailure::new(
                    ViolationKind::OneOf,
                    format!("must be one of: {}", listed.join(", ")),
                ))
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::Number;

    fn message(constraint: &Constraint, value: &Value) -> Option<String> {
        check_constraint(constraint, value).err().map(|f| f.message)
    }

    #[test]
    fn test_format() {
        let c = Constraint::format("@").unwrap();
        assert!(check_constraint(&c, &Value::from("a@b.c")).is_ok());
        assert_eq!(message(&c, &Value::from("invalid")).as_deref(), Some("does not match format"));
    }

    #[test]
    fn test_format_anchored() {
        let c = Constraint::format(r"^\d{5}$").unwrap();
        assert!(check_constraint(&c, &Value::from("12345")).is_ok());
        assert!(check_constraint(&c, &Value::from("123456")).is_err());
        assert!(check_constraint(&c, &Value::from("abc")).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let c = Constraint::MaxLength(3);
        // Three characters, six bytes.
        assert!(check_constraint(&c, &Value::from("äöü")).is_ok());
        assert_eq!(
            message(&c, &Value::from("abcd")).as_deref(),
            Some("must be at most 3 characters (maximum length)")
        );

        let c = Constraint::MinLength(2);
        assert!(check_constraint(&c, &Value::from("日本")).is_ok());
        assert_eq!(
            message(&c, &Value::from("a")).as_deref(),
            Some("must be at least 2 characters (minimum length)")
        );
    }

    #[test]
    fn test_numeric_bounds() {
        let min = Constraint::Min(Number::Integer(0));
        assert!(check_constraint(&min, &Value::Integer(0)).is_ok());
        assert!(check_constraint(&min, &Value::Float(0.5)).is_ok());
        assert_eq!(
            message(&min, &Value::Integer(-1)).as_deref(),
            Some("must be >= 0 (minimum value)")
        );

        let max = Constraint::Max(Number::Float(1.5));
        assert!(check_constraint(&max, &Value::Integer(1)).is_ok());
        assert_eq!(
            message(&max, &Value::Integer(2)).as_deref(),
            Some("must be <= 1.5 (maximum value)")
        );
        assert_eq!(
            check_constraint(&max, &Value::Integer(2)).unwrap_err().kind,
            ViolationKind::Max
        );
    }

    #[test]
    fn test_one_of() {
        let c = Constraint::OneOf(vec![Value::from("red"), Value::atom("blue"), Value::Integer(3)]);
        assert!(check_constraint(&c, &Value::from("red")).is_ok());
        assert!(check_constraint(&c, &Value::atom("blue")).is_ok());
        assert!(check_constraint(&c, &Value::Integer(3)).is_ok());
        // Strict equality: no cross-type matches.
        assert!(check_constraint(&c, &Value::from("blue")).is_err());
        assert!(check_constraint(&c, &Value::Float(3.0)).is_err());
        assert_eq!(
            message(&c, &Value::from("green")).as_deref(),
            Some("must be one of: red, :blue, 3")
        );

        let floats = Constraint::OneOf(vec![Value::Float(1.0), Value::Integer(2)]);
        assert_eq!(
            message(&floats, &Value::Integer(1)).as_deref(),
            Some("must be one of: 1.0, 2")
        );
    }

    #[test]
    fn test_incompatible_types_pass() {
        assert!(check_constraint(&Constraint::MinLength(10), &Value::Integer(1)).is_ok());
        assert!(check_constraint(&Constraint::format("^x$").unwrap(), &Value::atom("y")).is_ok());
        assert!(check_constraint(&Constraint::Min(Number::Integer(5)), &Value::from("1")).is_ok());
        assert!(check_constraint(&Constraint::Max(Number::Integer(0)), &Value::list(vec![])).is_ok());
    }
}
