//! Validation of data against contracts.
//!
//! This module provides:
//! - Type and constraint predicates
//! - The recursive validation engine
//! - Structured violations and report formatting

mod constraints;
mod engine;
mod report;
mod types;
mod violation;


pub use constraints::{check_constraint, ConstraintFailure};
pub use engine::{validate, validate_fields};
pub use report::{format_report, format_report_for};
pub use types::check_type;
pub use violation::{Violation, ViolationKind, Violations, CONTRACT_FIELD, ROOT_FIELD};
