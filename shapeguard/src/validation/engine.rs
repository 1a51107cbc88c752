//! The validation engine.
//!
//! Walks a contract's fields against a map value and accumulates every
//! violation. Field order is contract-declaration order, so the report is
//! deterministic regardless of how the data map iterates. Within a field:
//! a type mismatch stops further checks, otherwise every failing constraint
//! is reported, and only a field with no constraint failures is descended
//! into.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::constraints::check_constraint;
use super::types::check_type;
use super::violation::{Violation, Violations};
use crate::contracts::{Contract, ContractSource, Field, FieldType};
use crate::value::Value;

/// Validates `data` against the contract named `contract_name`.
///
/// Returns the data unchanged on success. An unknown contract yields a
/// single `_contract` violation and a non-map input a single `_root`
/// violation.
pub fn validate<S>(source: &S, contract_name: &str, data: Value) -> Result<Value, Violations>
where
    S: ContractSource + ?Sized,
{
    let Some(contract) = source.lookup_contract(contract_name) else {
        warn!(contract = %contract_name, "Contract not found");
        return Err(Violations::single(Violation::contract_not_found(
            contract_name,
        )));
    };
    contract.validate(data)
}

impl Contract {
    /// Validates `data`, handing it back unchanged on success.
    pub fn validate(&self, data: Value) -> Result<Value, Violations> {
        self.check(&data).map(|()| data)
    }

    /// Validates borrowed data.
    pub fn check(&self, data: &Value) -> Result<(), Violations> {
        let Value::Map(map) = data else {
            debug!(contract = %self.name(), got = data.type_name(), "Rejected non-map input");
            return Err(Violations::single(Violation::invalid_root(data)));
        };

        let violations = validate_fields(self.fields(), map, &[]);
        debug!(
            contract = %self.name(),
            violations = violations.len(),
            "Validated data against contract"
        );
        Violations::new(violations).map_or(Ok(()), Err)
    }
}

/// Validates a map against a field list, qualifying violations with `path`.
#[must_use]
pub fn validate_fields(
    fields: &[Field],
    data: &BTreeMap<String, Value>,
    path: &[String],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = path.to_vec();
    walk_fields(fields, data, &mut path, &mut violations);
    violations
}

fn walk_fields(
    fields: &[Field],
    data: &BTreeMap<String, Value>,
    path: &mut Vec<String>,
    out: &mut Vec<Violation>,
) {
    for field in fields {
        match data.get(field.name()) {
            Some(value) => walk_value(field, value, path, out),
            None if field.is_required() => {
                out.push(Violation::required(field.name()).with_path(path));
            }
            None => {}
        }
    }
}

fn walk_value(field: &Field, value: &Value, path: &mut Vec<String>, out: &mut Vec<Violation>) {
    if !check_type(field.field_type(), value) {
        out.push(Violation::type_mismatch(field.name(), field.field_type(), value).with_path(path));
        return;
    }

    let before = out.len();
    for constraint in field.constraints() {
        if let Err(failure) = check_constraint(constraint, value) {
            out.push(Violation::new(field.name(), failure.kind, failure.message).with_path(path));
        }
    }
    if out.len() > before {
        return;
    }

    match (field.field_type(), value) {
        (FieldType::Map, Value::Map(map)) => {
            if let Some(nested) = field.nested_fields() {
                path.push(field.name().to_string());
                walk_fields(nested, map, path, out);
                path.pop();
            }
        }
        (FieldType::ListOf(item_type), Value::List(items)) => {
            for item in items.iter().filter(|item| !check_type(item_type, item)) {
                out.push(Violation::item_type(field.name(), item_type, item).with_path(path));
            }
        }
        _ => {}
    }
}
