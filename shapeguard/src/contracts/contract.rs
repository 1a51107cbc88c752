//! Named, ordered field lists.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use super::field::{Field, FieldType};
use crate::errors::{ContractError, ContractResult};

/// A named, immutable, ordered list of fields.
///
/// Built through [`Contract::new`] or loaded from JSON; either way the
/// construction invariants hold: names are non-empty and unique within
/// each field list, and only `map` fields carry nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContractDocument")]
pub struct Contract {
    name: String,
    fields: Vec<Field>,
}

/// Unchecked serialized form of a contract.
#[derive(Debug, Deserialize)]
struct ContractDocument {
    name: String,
    #[serde(default)]
    fields: Vec<Field>,
}

impl TryFrom<ContractDocument> for Contract {
    type Error = ContractError;

    fn try_from(doc: ContractDocument) -> Result<Self, Self::Error> {
        Self::new(doc.name, doc.fields)
    }
}

impl Contract {
    /// Builds a contract, checking its structural invariants.
    ///
    /// Constraints that can never apply to their field's type are accepted
    /// but logged; see [`Contract::lint`].
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> ContractResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ContractError::EmptyName { what: "contract" });
        }
        check_fields(&fields, &name)?;

        let contract = Self { name, fields };
        for warning in contract.lint() {
            warn!(contract = %contract.name, field = %warning.location(), "{}", warning);
        }
        Ok(contract)
    }

    /// Parses and builds a contract from a JSON document.
    pub fn from_json_str(json: &str) -> ContractResult<Self> {
        let doc: ContractDocument = serde_json::from_str(json)?;
        Self::try_from(doc)
    }

    /// The contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a top-level field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Lists constraints attached to a type they never apply to.
    ///
    /// Such constraints silently pass during validation.
    #[must_use]
    pub fn lint(&self) -> Vec<ConstraintWarning> {
        let mut warnings = Vec::new();
        lint_fields(&self.fields, &mut Vec::new(), &mut warnings);
        warnings
    }

    /// Compares this contract (the old version) with `other` (the new one).
    #[must_use]
    pub fn compatibility(&self, other: &Self) -> CompatibilityReport {
        let mut report = CompatibilityReport {
            contract: self.name.clone(),
            breaking_changes: Vec::new(),
            warnings: Vec::new(),
        };
        diff_fields(&self.fields, &other.fields, "", &mut report);
        report
    }
}

fn check_fields(fields: &[Field], location: &str) -> ContractResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name().trim().is_empty() {
            return Err(ContractError::EmptyName { what: "field" });
        }
        if !seen.insert(field.name()) {
            return Err(ContractError::DuplicateField {
                field: field.name().to_string(),
                location: location.to_string(),
            });
        }
        match (field.field_type(), field.nested_fields()) {
            (FieldType::Map, Some(nested)) => {
                check_fields(nested, &format!("{location}.{}", field.name()))?;
            }
            (other, Some(_)) => {
                return Err(ContractError::NestedOnNonMap {
                    field: field.name().to_string(),
                    field_type: other.to_string(),
                });
            }
            (_, None) => {}
        }
    }
    Ok(())
}

/// A constraint that will never be evaluated because of its field's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintWarning {
    /// Enclosing field names.
    pub path: Vec<String>,
    /// The field carrying the constraint.
    pub field: String,
    /// Constraint name, e.g. `min_length`.
    pub constraint: &'static str,
    /// The field's declared type.
    pub field_type: String,
}

impl ConstraintWarning {
    /// Dotted location of the field.
    #[must_use]
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            self.field.clone()
        } else {
            format!("{}.{}", self.path.join("."), self.field)
        }
    }
}

impl fmt::Display for ConstraintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Constraint {} on field '{}' never applies to {} values",
            self.constraint,
            self.location(),
            self.field_type
        )
    }
}

fn lint_fields(fields: &[Field], path: &mut Vec<String>, out: &mut Vec<ConstraintWarning>) {
    for field in fields {
        for constraint in field.constraints() {
            if !constraint.applies_to(field.field_type()) {
                out.push(ConstraintWarning {
                    path: path.clone(),
                    field: field.name().to_string(),
                    constraint: constraint.name(),
                    field_type: field.field_type().to_string(),
                });
            }
        }
        if let Some(nested) = field.nested_fields() {
            path.push(field.name().to_string());
            lint_fields(nested, path, out);
            path.pop();
        }
    }
}

/// Differences between two versions of a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Name of the old contract.
    pub contract: String,
    /// Changes that reject data the old version accepted.
    pub breaking_changes: Vec<String>,
    /// Non-breaking differences.
    pub warnings: Vec<String>,
}

impl CompatibilityReport {
    /// True when no breaking changes were detected.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.breaking_changes.is_empty()
    }

    /// Human readable summary string.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = if self.is_compatible() {
            "compatible"
        } else {
            "breaking"
        };
        format!(
            "Contract diff for {}: {} (breaking={}, warnings={})",
            self.contract,
            status,
            self.breaking_changes.len(),
            self.warnings.len()
        )
    }
}

fn diff_fields(old: &[Field], new: &[Field], prefix: &str, report: &mut CompatibilityReport) {
    let qualified = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        }
    };

    // Removed fields -> breaking
    for field in old {
        if !new.iter().any(|f| f.name() == field.name()) {
            report
                .breaking_changes
                .push(format!("Field '{}' removed", qualified(field.name())));
        }
    }

    for field in new {
        let name = qualified(field.name());
        let Some(previous) = old.iter().find(|f| f.name() == field.name()) else {
            if field.is_required() {
                report.breaking_changes.push(format!("Required field '{name}' added"));
            } else {
                report.warnings.push(format!("Optional field '{name}' added"));
            }
            continue;
        };

        if previous.field_type() != field.field_type() {
            report.breaking_changes.push(format!(
                "Field '{name}' changed type {} -> {}",
                previous.field_type(),
                field.field_type()
            ));
            continue;
        }
        if !previous.is_required() && field.is_required() {
            report.breaking_changes.push(format!("Field '{name}' became required"));
        } else if previous.is_required() && !field.is_required() {
            report.warnings.push(format!("Field '{name}' became optional"));
        }
        if previous.constraints() != field.constraints() {
            report.warnings.push(format!("Field '{name}' constraints changed"));
        }
        if let (Some(old_nested), Some(new_nested)) =
            (previous.nested_fields(), field.nested_fields())
        {
            diff_fields(old_nested, new_nested, &name, report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::Constraint;

    fn user_contract() -> Contract {
        Contract::new(
            "user",
            vec![
                Field::required("email", FieldType::String),
                Field::required_map("address", vec![Field::required("zip", FieldType::String)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_contract_new() {
        let contract = user_contract();
        assert_eq!(contract.name(), "user");
        assert_eq!(contract.fields().len(), 2);
        assert!(contract.field("address").is_some());
        assert!(contract.field("missing").is_none());
    }

    #[test]
    fn test_empty_contract_name() {
        let err = Contract::new("  ", vec![]).unwrap_err();
        assert!(matches!(err, ContractError::EmptyName { what: "contract" }));
    }

    #[test]
    fn test_duplicate_field() {
        let err = Contract::new(
            "user",
            vec![
                Field::required("email", FieldType::String),
                Field::optional("email", FieldType::String),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::DuplicateField { ref field, .. } if field == "email"));
    }

    #[test]
    fn test_duplicate_nested_field_location() {
        let err = Contract::new(
            "user",
            vec![Field::required_map(
                "address",
                vec![
                    Field::required("zip", FieldType::String),
                    Field::required("zip", FieldType::String),
                ],
            )],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate field 'zip' in user.address");
    }

    #[test]
    fn test_same_name_at_different_levels_allowed() {
        let result = Contract::new(
            "user",
            vec![
                Field::required("id", FieldType::Integer),
                Field::required_map("owner", vec![Field::required("id", FieldType::Integer)]),
            ],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_nested_on_non_map_rejected_from_json() {
        let err = Contract::from_json_str(
            r#"{"name": "user", "fields": [
                {"name": "tags", "type": "list", "fields": [{"name": "x", "type": "string"}]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NestedOnNonMap { ref field, .. } if field == "tags"));
    }

    #[test]
    fn test_from_json_str() {
        let contract = Contract::from_json_str(
            r#"{
                "name": "signup",
                "fields": [
                    {"name": "email", "type": "string", "required": true,
                     "constraints": [{"format": "@"}, {"min_length": 3}]},
                    {"name": "tags", "type": {"list_of": "string"}},
                    {"name": "address", "type": "map", "required": true,
                     "fields": [{"name": "zip", "type": "string", "required": true}]}
                ]
            }"#,
        )
        .unwrap();

        let email = contract.field("email").unwrap();
        assert!(email.is_required());
        assert_eq!(email.constraints()[1], Constraint::MinLength(3));
        assert_eq!(
            contract.field("tags").unwrap().field_type(),
            &FieldType::list_of(FieldType::String)
        );
        assert_eq!(
            contract.field("address").unwrap().nested_fields().unwrap()[0].name(),
            "zip"
        );
    }

    #[test]
    fn test_from_json_str_invalid_json() {
        let err = Contract::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ContractError::Parse(_)));
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let contract = user_contract();
        let json = serde_json::to_string(&contract).unwrap();
        let back: Contract = serde_json::from_str(&json).unwrap();
        assert_eq!(contract, back);
    }

    #[test]
    fn test_lint_reports_incompatible_constraints() {
        let contract = Contract::new(
            "user",
            vec![
                Field::required("age", FieldType::Integer).min_length(1).min(0),
                Field::required_map(
                    "profile",
                    vec![Field::optional("nickname", FieldType::Atom).max(3)],
                ),
            ],
        )
        .unwrap();

        let warnings = contract.lint();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].location(), "age");
        assert_eq!(warnings[0].constraint, "min_length");
        assert_eq!(warnings[1].location(), "profile.nickname");
        assert_eq!(
            warnings[1].to_string(),
            "Constraint max on field 'profile.nickname' never applies to atom values"
        );
    }

    #[test]
    fn test_compatibility_optional_added() {
        let old = user_contract();
        let new = Contract::new(
            "user",
            vec![
                Field::required("email", FieldType::String),
                Field::required_map("address", vec![Field::required("zip", FieldType::String)]),
                Field::optional("age", FieldType::Integer),
            ],
        )
        .unwrap();

        let report = old.compatibility(&new);
        assert!(report.is_compatible());
        assert_eq!(report.warnings, vec!["Optional field 'age' added".to_string()]);
    }

    #[test]
    fn test_compatibility_breaking_changes() {
        let old = user_contract();
        let new = Contract::new(
            "user",
            vec![
                Field::required("email", FieldType::Atom),
                Field::required_map(
                    "address",
                    vec![
                        Field::required("zip", FieldType::String),
                        Field::required("city", FieldType::String),
                    ],
                ),
            ],
        )
        .unwrap();

        let report = old.compatibility(&new);
        assert!(!report.is_compatible());
        assert_eq!(
            report.breaking_changes,
            vec![
                "Field 'email' changed type string -> atom".to_string(),
                "Required field 'address.city' added".to_string(),
            ]
        );
        assert!(report.summary().contains("breaking"));
    }

    #[test]
    fn test_compatibility_removed_field() {
        let old = user_contract();
        let new = Contract::new("user", vec![Field::required("email", FieldType::String)]).unwrap();
        let report = old.compatibility(&new);
        assert_eq!(report.breaking_changes, vec!["Field 'address' removed".to_string()]);
    }
}
