pub mod algebra;
pub mod check;
pub mod contract;
pub mod error;
pub mod ltl;
pub mod set;

// Re-export commonly used types
pub use algebra::{
    compatibility, compose, compose_all, conjoin, conjoin_all, consistency, refines, CombineMode,
};
pub use check::{Check, CheckKind, CheckList};
pub use contract::{Contract, Variable};
pub use error::{AlgebraError, CoreError};
pub use set::ContractSet;
