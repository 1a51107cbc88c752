//! # Shapeguard
//!
//! Contract-based validation for dynamically shaped data.
//!
//! A [`Contract`](contracts::Contract) describes the fields a map must
//! carry: their types, whether they are required, constraints on their
//! values, and the shape of nested maps. The engine walks a value against
//! a contract and returns either the untouched value or every violation
//! it found, each qualified with the path of enclosing fields.
//!
//! - **Contracts**: built in code or loaded from JSON documents
//! - **Validation**: type, format, length, range and enumeration checks
//! - **Reporting**: structured violations plus a deterministic text report
//! - **Guards**: validate a call's input before the call proceeds
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard::prelude::*;
//! use serde_json::json;
//!
//! let contract = Contract::new(
//!     "signup",
//!     vec![
//!         Field::required("email", FieldType::String).format("@")?,
//!         Field::required("age", FieldType::Integer).min(0),
//!     ],
//! )?;
//!
//! let err = contract
//!     .validate(Value::from(json!({"email": "invalid", "age": -1})))
//!     .unwrap_err();
//! assert_eq!(err.len(), 2);
//! # Ok::<(), shapeguard::errors::ContractError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod contracts;
pub mod errors;
pub mod guard;
pub mod testing;
pub mod validation;
pub mod value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::contracts::{
        Constraint, Contract, ContractRegistry, ContractSet, ContractSource, Field, FieldType,
        Number, REGISTRY,
    };
    pub use crate::errors::{ContractError, ContractResult};
    pub use crate::guard::{ContractGuard, GuardError};
    pub use crate::validation::{
        format_report, format_report_for, validate, Violation, ViolationKind, Violations,
    };
    pub use crate::value::Value;
}
