//! Contract lookup and process-wide registration.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::debug;

use super::Contract;
use crate::errors::{ContractError, ContractResult};

/// Anything that can resolve a contract by name.
///
/// An implementor plays the role of a contract *owner*: the module or type
/// the contracts were declared on.
#[cfg_attr(test, mockall::automock)]
pub trait ContractSource: Send + Sync {
    /// Resolves a contract, or `None` if the name is unknown.
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>>;
}

impl<S: ContractSource + ?Sized> ContractSource for Arc<S> {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        (**self).lookup_contract(name)
    }
}

impl<S: ContractSource + ?Sized> ContractSource for &S {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        (**self).lookup_contract(name)
    }
}

/// A lone contract resolves its own name.
///
/// Each lookup clones the contract into a fresh `Arc`. For repeated
/// lookups, put the contract in a [`ContractSet`], which hands out shared
/// references.
impl ContractSource for Contract {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        (self.name() == name).then(|| Arc::new(self.clone()))
    }
}

/// The contracts declared by one owner, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ContractSet {
    contracts: BTreeMap<String, Arc<Contract>>,
}

#[derive(Debug, Deserialize)]
struct ContractSetDocument {
    #[serde(default)]
    contracts: Vec<Contract>,
}

impl ContractSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contract.
    ///
    /// Re-adding an identical contract is a no-op; a different contract
    /// under an existing name is rejected.
    pub fn insert(&mut self, contract: Contract) -> ContractResult<Arc<Contract>> {
        if let Some(existing) = self.contracts.get(contract.name()) {
            if **existing == contract {
                return Ok(Arc::clone(existing));
            }
            return Err(ContractError::DuplicateContract {
                name: contract.name().to_string(),
            });
        }
        let contract = Arc::new(contract);
        self.contracts
            .insert(contract.name().to_string(), Arc::clone(&contract));
        Ok(contract)
    }

    /// Adds a contract, returning the set for chaining.
    pub fn with(mut self, contract: Contract) -> ContractResult<Self> {
        self.insert(contract)?;
        Ok(self)
    }

    /// Parses a `{"contracts": [...]}` document.
    pub fn from_json_str(json: &str) -> ContractResult<Self> {
        let doc: ContractSetDocument = serde_json::from_str(json)?;
        doc.contracts
            .into_iter()
            .try_fold(Self::new(), Self::with)
    }

    /// Reads and parses a contract document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let set = Self::from_json_str(&json)?;
        debug!(path = %path.display(), contracts = set.len(), "Loaded contract document");
        Ok(set)
    }

    /// Contract names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.contracts.keys().map(String::as_str).collect()
    }

    /// Returns the number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl ContractSource for ContractSet {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        self.contracts.get(name).cloned()
    }
}

/// A contract together with its registration metadata.
#[derive(Debug, Clone)]
pub struct RegisteredContract {
    /// Owner the contract was registered on.
    pub owner: String,
    /// The contract.
    pub contract: Arc<Contract>,
    /// When the contract was registered.
    pub registered_at: DateTime<Utc>,
}

/// In-memory registry of contracts keyed by owner and name.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    entries: RwLock<HashMap<(String, String), RegisteredContract>>,
}

impl ContractRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all registered entries (primarily for tests).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Register a contract on an owner.
    ///
    /// Registering an identical contract twice returns the existing entry.
    pub fn register(
        &self,
        owner: impl Into<String>,
        contract: Contract,
    ) -> ContractResult<RegisteredContract> {
        let owner = owner.into();
        let key = (owner.clone(), contract.name().to_string());

        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&key) {
            if *existing.contract == contract {
                return Ok(existing.clone());
            }
            return Err(ContractError::AlreadyRegistered {
                owner,
                name: key.1,
            });
        }

        let entry = RegisteredContract {
            owner,
            contract: Arc::new(contract),
            registered_at: Utc::now(),
        };
        debug!(owner = %entry.owner, contract = %key.1, "Registered contract");
        entries.insert(key, entry.clone());
        Ok(entry)
    }

    /// Registers every contract of a set on an owner.
    ///
    /// All or nothing: if any contract conflicts with an existing
    /// registration, none of the set is registered.
    pub fn register_set(&self, owner: &str, set: &ContractSet) -> ContractResult<()> {
        let mut entries = self.entries.write();
        for (name, contract) in &set.contracts {
            let key = (owner.to_string(), name.clone());
            if let Some(existing) = entries.get(&key) {
                if existing.contract != *contract {
                    return Err(ContractError::AlreadyRegistered {
                        owner: owner.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        let registered_at = Utc::now();
        for (name, contract) in &set.contracts {
            entries
                .entry((owner.to_string(), name.clone()))
                .or_insert_with(|| {
                    debug!(owner = %owner, contract = %name, "Registered contract");
                    RegisteredContract {
                        owner: owner.to_string(),
                        contract: Arc::clone(contract),
                        registered_at,
                    }
                });
        }
        Ok(())
    }

    /// Fetch a contract for a given owner/name.
    #[must_use]
    pub fn get(&self, owner: &str, name: &str) -> Option<Arc<Contract>> {
        self.entries
            .read()
            .get(&(owner.to_string(), name.to_string()))
            .map(|entry| Arc::clone(&entry.contract))
    }

    /// Fetch a contract, failing with [`ContractError::ContractNotFound`].
    pub fn require(&self, owner: &str, name: &str) -> ContractResult<Arc<Contract>> {
        self.get(owner, name)
            .ok_or_else(|| ContractError::ContractNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            })
    }

    /// Return all registrations, optionally filtered by owner.
    #[must_use]
    pub fn list(&self, owner: Option<&str>) -> Vec<RegisteredContract> {
        let entries = self.entries.read();
        let mut result: Vec<_> = entries
            .values()
            .filter(|e| owner.is_none() || owner == Some(e.owner.as_str()))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            (&a.owner, a.contract.name()).cmp(&(&b.owner, b.contract.name()))
        });
        result
    }

    /// A lookup view restricted to one owner.
    #[must_use]
    pub fn owner<'a>(&'a self, owner: &'a str) -> OwnerScope<'a> {
        OwnerScope {
            registry: self,
            owner,
        }
    }

    /// Returns the number of registered contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// The contracts of a single owner within a registry.
#[derive(Debug, Clone, Copy)]
pub struct OwnerScope<'a> {
    registry: &'a ContractRegistry,
    owner: &'a str,
}

impl OwnerScope<'_> {
    /// The owner this scope resolves against.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner
    }
}

impl ContractSource for OwnerScope<'_> {
    fn lookup_contract(&self, name: &str) -> Option<Arc<Contract>> {
        self.registry.get(self.owner, name)
    }
}

/// Global contract registry.
pub static REGISTRY: LazyLock<Arc<ContractRegistry>> =
    LazyLock::new(|| Arc::new(ContractRegistry::new()));
