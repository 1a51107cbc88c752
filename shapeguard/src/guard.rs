//! Boundary enforcement.
//!
//! A [`ContractGuard`] sits in front of a function and validates its input
//! first. Valid input is passed through untouched; invalid input
//! short-circuits with a [`GuardError`] carrying both the formatted report
//! and the raw violations.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::contracts::{Contract, ContractRegistry, ContractSource};
use crate::validation::{format_report_for, validate, Violations};
use crate::value::Value;

/// Error raised when a guard rejects its input.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The input violated the contract, or the contract was missing.
    #[error("{report}")]
    Rejected {
        /// Contract the input was checked against.
        contract: String,
        /// Formatted report naming the contract.
        report: String,
        /// The violations, for programmatic inspection.
        violations: Violations,
    },
}

impl GuardError {
    fn rejected(contract: &str, violations: Violations) -> Self {
        Self::Rejected {
            contract: contract.to_string(),
            report: format_report_for(contract, violations.as_slice()),
            violations,
        }
    }

    /// The violations behind the rejection.
    #[must_use]
    pub const fn violations(&self) -> &Violations {
        match self {
            Self::Rejected { violations, .. } => violations,
        }
    }

    /// The contract the input was checked against.
    #[must_use]
    pub fn contract(&self) -> &str {
        match self {
            Self::Rejected { contract, .. } => contract,
        }
    }
}

struct RegistryOwner {
    registry: Arc<ContractRegistry>,
    owner: String,
}

impl ContractSource for RegistryOwner {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        self.registry.get(&self.owner, name)
    }
}

/// Validates input against a named contract before letting a call proceed.
#[derive(Clone)]
pub struct ContractGuard {
    source: Arc<dyn ContractSource>,
    contract: String,
}

impl std::fmt::Debug for ContractGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractGuard")
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

impl ContractGuard {
    /// Creates a guard resolving `contract` against `source`.
    ///
    /// The contract is resolved on every check, so a guard may be built
    /// before its contract is registered.
    #[must_use]
    pub fn new(source: Arc<dyn ContractSource>, contract: impl Into<String>) -> Self {
        Self {
            source,
            contract: contract.into(),
        }
    }

    /// Creates a guard for a contract registered on `owner`.
    #[must_use]
    pub fn for_owner(
        registry: Arc<ContractRegistry>,
        owner: impl Into<String>,
        contract: impl Into<String>,
    ) -> Self {
        Self::new(
            Arc::new(RegistryOwner {
                registry,
                owner: owner.into(),
            }),
            contract,
        )
    }

    /// The guarded contract name.
    #[must_use]
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Validates `data`, returning it unchanged if it passes.
    pub fn check(&self, data: Value) -> Result<Value, GuardError> {
        match validate(&self.source, &self.contract, data) {
            Ok(data) => {
                debug!(contract = %self.contract, "Guard passed");
                Ok(data)
            }
            Err(violations) => {
                warn!(
                    contract = %self.contract,
                    violations = violations.len(),
                    configuration_error = violations.is_configuration_error(),
                    "Guard rejected input"
                );
                Err(GuardError::rejected(&self.contract, violations))
            }
        }
    }

    /// Runs `f` on `data` only if the data is valid.
    pub fn call<F, R>(&self, data: Value, f: F) -> Result<R, GuardError>
    where
        F: FnOnce(Value) -> R,
    {
        self.check(data).map(f)
    }

    /// Wraps `f` so every call is validated first.
    pub fn wrap<F, R>(self, f: F) -> impl Fn(Value) -> Result<R, GuardError>
    where
        F: Fn(Value) -> R,
    {
        move |data| self.call(data, &f)
    }
}
