//! Contract data model.
//!
//! This module provides:
//! - Field and type descriptors
//! - Constraints attached to fields
//! - Named contracts with construction-time invariants
//! - Contract sources and a process-wide registry

mod constraint;
mod contract;
mod field;
mod registry;

pub use constraint::{Constraint, Number, Pattern};
pub use contract::{CompatibilityReport, ConstraintWarning, Contract};
pub use field::{Field, FieldType};
pub use registry::{
    ContractRegistry, ContractSet, ContractSource, OwnerScope, RegisteredContract, REGISTRY,
};

#[cfg(test)]
pub use registry::MockContractSource;
