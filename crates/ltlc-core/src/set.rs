//! The contract registry for one system under check.
//!
//! [`ContractSet`] owns every contract and the shared alphabet: the union
//! of all declared `(identifier, initial value)` pairs, deduplicated by
//! identifier in first-declaration order. The specification parser is the
//! sole writer; every other component reads it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSet {
    contracts: IndexMap<String, Contract>,
    alphabet: IndexMap<String, String>,
}

impl ContractSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contract under its name and fold its variables into the
    /// shared alphabet.
    ///
    /// Duplicate contract names are rejected, as is re-declaring an
    /// identifier with a different initial value than an earlier contract.
    pub fn insert(&mut self, contract: Contract) -> Result<(), CoreError> {
        if self.contracts.contains_key(contract.name()) {
            return Err(CoreError::DuplicateContract {
                name: contract.name().to_string(),
            });
        }
        for variable in contract.variables() {
            match self.alphabet.get(&variable.name) {
                None => {
                    self.alphabet
                        .insert(variable.name.clone(), variable.init.clone());
                }
                Some(init) if *init == variable.init => {}
                Some(init) => {
                    return Err(CoreError::ConflictingInit {
                        variable: variable.name.clone(),
                        left: init.clone(),
                        right: variable.init.clone(),
                    });
                }
            }
        }
        self.contracts
            .insert(contract.name().to_string(), contract);
        Ok(())
    }

    /// Look up a contract by name.
    pub fn get(&self, name: &str) -> Result<&Contract, CoreError> {
        self.contracts
            .get(name)
            .ok_or_else(|| CoreError::UnknownContract {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// The shared alphabet: `(identifier, initial value)` pairs in
    /// first-declaration order, deduplicated by identifier.
    pub fn alphabet(&self) -> &IndexMap<String, String> {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values()
    }
}
