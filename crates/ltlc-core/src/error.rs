//! Core error types for ltlc-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! all anticipated failure modes in the contract model and algebra.

use thiserror::Error;

/// Core errors produced by the contract and check data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Registering a contract name that already exists in the set.
    #[error("duplicate contract name: '{name}'")]
    DuplicateContract { name: String },

    /// A contract name was not found in the set.
    #[error("unknown contract: '{name}'")]
    UnknownContract { name: String },

    /// A variable identifier was declared twice within one contract.
    #[error("duplicate variable '{variable}' in contract '{contract}'")]
    DuplicateVariable { contract: String, variable: String },

    /// The same identifier was declared with two different initial values.
    #[error("conflicting initial values for variable '{variable}': '{left}' vs '{right}'")]
    ConflictingInit {
        variable: String,
        left: String,
        right: String,
    },

    /// A check was constructed with the wrong number of operand contracts.
    #[error("{kind} check takes exactly {expected} contracts, got {found}")]
    CheckArity {
        kind: String,
        expected: usize,
        found: usize,
    },
}

/// Errors produced by the contract algebra operators.
#[derive(Debug, Error)]
pub enum AlgebraError {
    /// Operand contracts declare the same identifier with different
    /// initial values, so their variable union is ill-defined.
    #[error("conflicting initial values for variable '{variable}': '{left}' vs '{right}'")]
    ConflictingInit {
        variable: String,
        left: String,
        right: String,
    },

    /// A chained operator was applied to an empty sequence of contracts.
    #[error("cannot fold an empty sequence of contracts")]
    EmptyFold,
}
