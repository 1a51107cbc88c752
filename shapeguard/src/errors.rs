//! Error types for contract construction and lookup.
//!
//! Data violations are not errors in this sense: they travel through
//! [`crate::validation::Violations`]. The types here describe a contract
//! that cannot be built, loaded, or found.

use thiserror::Error;

/// Errors raised while building, loading, or registering contracts.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A contract or field was given an empty name.
    #[error("{what} name cannot be empty or whitespace-only")]
    EmptyName {
        /// What was being named ("contract" or "field").
        what: &'static str,
    },

    /// Two fields in the same field list share a name.
    #[error("Duplicate field '{field}' in {location}")]
    DuplicateField {
        /// The repeated field name.
        field: String,
        /// Where the duplicate appeared (contract name or dotted path).
        location: String,
    },

    /// Nested fields were attached to a field whose type is not `map`.
    #[error("Field '{field}' has nested fields but is of type {field_type}")]
    NestedOnNonMap {
        /// The offending field.
        field: String,
        /// Its declared type.
        field_type: String,
    },

    /// A format constraint did not compile.
    #[error("Invalid format pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// The regex compiler error.
        #[source]
        source: regex::Error,
    },

    /// A set already holds a different contract with this name.
    #[error("Duplicate contract '{name}' with a different definition")]
    DuplicateContract {
        /// Contract name.
        name: String,
    },

    /// A different contract is already registered under the same name.
    #[error("Contract {owner}::{name} already registered with a different definition")]
    AlreadyRegistered {
        /// Owner of the contract.
        owner: String,
        /// Contract name.
        name: String,
    },

    /// No contract with this name exists for the owner.
    #[error("Contract {owner}::{name} not found")]
    ContractNotFound {
        /// Owner that was searched.
        owner: String,
        /// Requested contract name.
        name: String,
    },

    /// A contract document could not be parsed.
    #[error("Failed to parse contract document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A contract document could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
