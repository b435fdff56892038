//! Checks relate contracts and realize each relation as an LTL obligation.
//!
//! A [`Check`] is one canonical tagged variant: a [`CheckKind`] plus an
//! ordered list of operand contracts resolved at parse time. The keyword
//! registry lives in [`CheckKind::from_keyword`]; unknown keywords resolve
//! to `None` so the parser can reject them with a typed error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algebra::{self, CombineMode};
use crate::contract::Contract;
use crate::error::{AlgebraError, CoreError};
use crate::ltl;

/// The relation a check asserts between its operand contracts.
///
/// Compatibility and consistency carry the sub-mode selecting which
/// combinator produces their operand contract. Refinement is ordered:
/// operand 0 is the candidate, operand 1 the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    Compatibility(CombineMode),
    Consistency(CombineMode),
    Refinement,
}

impl CheckKind {
    /// Resolve a check-type keyword, case-insensitively.
    ///
    /// The surface language always combines by composition; the
    /// conjunction sub-mode is only reachable through the API.
    pub fn from_keyword(keyword: &str) -> Option<CheckKind> {
        match keyword.to_ascii_lowercase().as_str() {
            "compatibility" => Some(CheckKind::Compatibility(CombineMode::Composition)),
            "consistency" => Some(CheckKind::Consistency(CombineMode::Composition)),
            "refinement" => Some(CheckKind::Refinement),
            _ => None,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::Compatibility(_) => "compatibility",
            CheckKind::Consistency(_) => "consistency",
            CheckKind::Refinement => "refinement",
        };
        f.write_str(name)
    }
}

/// A single declared check: kind plus exactly two operand contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    kind: CheckKind,
    operands: Vec<Contract>,
}

impl Check {
    /// Number of operand contracts every check takes in this version.
    pub const ARITY: usize = 2;

    pub fn new(kind: CheckKind, operands: Vec<Contract>) -> Result<Self, CoreError> {
        if operands.len() != Self::ARITY {
            return Err(CoreError::CheckArity {
                kind: kind.to_string(),
                expected: Self::ARITY,
                found: operands.len(),
            });
        }
        Ok(Self { kind, operands })
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    pub fn operands(&self) -> &[Contract] {
        &self.operands
    }

    /// The proof obligation for this check, before the `LTLSPEC` wrapping.
    ///
    /// Compatibility asks whether the combined assumption is unsatisfiable;
    /// consistency asks the same of the combined guarantee; refinement is
    /// the implication pair from [`algebra::refines`].
    pub fn formula(&self) -> Result<String, AlgebraError> {
        let (a, b) = (&self.operands[0], &self.operands[1]);
        match self.kind {
            CheckKind::Compatibility(mode) => algebra::compatibility(a, b, mode),
            CheckKind::Consistency(mode) => algebra::consistency(a, b, mode),
            CheckKind::Refinement => Ok(algebra::refines(a, b)),
        }
    }

    /// The full obligation line for the generated model file.
    pub fn ltl_spec(&self) -> Result<String, AlgebraError> {
        Ok(ltl::spec(&self.formula()?))
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.operands.iter().map(|c| c.name()).collect();
        write!(f, "{}({})", self.kind, names.join(", "))
    }
}

/// Ordered sequence of checks, preserving specification order.
///
/// Position `i` in the emitted obligation list must equal position `i` in
/// the engine's verdict stream; every consumer relies on that alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckList {
    checks: Vec<Check>,
}

impl CheckList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: Check) {
        self.checks.push(check);
    }

    pub fn get(&self, index: usize) -> Option<&Check> {
        self.checks.get(index)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }
}

impl<'a> IntoIterator for &'a CheckList {
    type Item = &'a Check;
    type IntoIter = std::slice::Iter<'a, Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(name: &str, assumption: &str, guarantee: &str) -> Contract {
        let mut contract = Contract::new(name);
        contract.add_assumption(assumption);
        contract.add_guarantee(guarantee);
        contract
    }

    #[test]
    fn keyword_registry_is_case_insensitive() {
        assert_eq!(
            CheckKind::from_keyword("Compatibility"),
            Some(CheckKind::Compatibility(CombineMode::Composition))
        );
        assert_eq!(
            CheckKind::from_keyword("CONSISTENCY"),
            Some(CheckKind::Consistency(CombineMode::Composition))
        );
        assert_eq!(
            CheckKind::from_keyword("refinement"),
            Some(CheckKind::Refinement)
        );
        assert_eq!(CheckKind::from_keyword("reachability"), None);
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let a = contract("a", "x", "y");
        let err = Check::new(CheckKind::Refinement, vec![a]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CheckArity {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn compatibility_obligation_negates_the_composite_assumption() {
        let a = contract("a", "x", "y");
        let b = contract("b", "p", "q");
        let check = Check::new(
            CheckKind::Compatibility(CombineMode::Composition),
            vec![a, b],
        )
        .unwrap();

        assert_eq!(
            check.ltl_spec().unwrap(),
            "\tLTLSPEC !((((x) & (p)) | !(((x) -> (y)) & ((p) -> (q)))));\n"
        );
    }

    #[test]
    fn consistency_obligation_negates_the_composite_guarantee() {
        let a = contract("a", "x", "y");
        let b = contract("b", "p", "q");
        let check = Check::new(
            CheckKind::Consistency(CombineMode::Composition),
            vec![a, b],
        )
        .unwrap();

        assert_eq!(
            check.ltl_spec().unwrap(),
            "\tLTLSPEC !((((x) -> (y)) & ((p) -> (q))));\n"
        );
    }

    #[test]
    fn refinement_obligation_is_order_sensitive() {
        let a = contract("a", "x", "y");
        let b = contract("b", "p", "q");
        let forward = Check::new(CheckKind::Refinement, vec![a.clone(), b.clone()]).unwrap();
        let backward = Check::new(CheckKind::Refinement, vec![b, a]).unwrap();
        assert_ne!(forward.ltl_spec().unwrap(), backward.ltl_spec().unwrap());
    }

    #[test]
    fn display_names_kind_and_operands() {
        let a = contract("waiter", "TRUE", "G(x)");
        let b = contract("customer", "TRUE", "F(y)");
        let check = Check::new(
            CheckKind::Compatibility(CombineMode::Composition),
            vec![a, b],
        )
        .unwrap();
        assert_eq!(check.to_string(), "compatibility(waiter, customer)");
    }

    #[test]
    fn check_list_preserves_order() {
        let a = contract("a", "x", "y");
        let b = contract("b", "p", "q");
        let mut list = CheckList::new();
        list.push(
            Check::new(
                CheckKind::Compatibility(CombineMode::Composition),
                vec![a.clone(), b.clone()],
            )
            .unwrap(),
        );
        list.push(Check::new(CheckKind::Refinement, vec![a, b]).unwrap());

        let kinds: Vec<String> = list.iter().map(|c| c.kind().to_string()).collect();
        assert_eq!(kinds, vec!["compatibility", "refinement"]);
    }
}
