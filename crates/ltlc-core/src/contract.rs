//! The contract data model: a named unit of assumptions and guarantees.
//!
//! A [`Contract`] is built up incrementally by the specification parser,
//! saturated exactly once when its source block closes, and immutable from
//! then on. Assumption and guarantee fragments are verbatim LTL strings;
//! no syntax validation happens here -- the external model checker is the
//! source of truth for well-formedness.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ltl;

/// A declared boolean variable with its initial-value literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub init: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, init: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            init: init.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.name, self.init)
    }
}

/// An assume/guarantee contract.
///
/// Fragments in `assumptions` and `guarantees` are implicitly conjoined.
/// Saturation rewrites every guarantee `g` to `(A -> g)`, where `A` is the
/// assumption formula; it must happen exactly once before the contract
/// participates in any algebra operation, and [`Contract::saturate`] is
/// idempotent so a second call is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    name: String,
    variables: Vec<Variable>,
    assumptions: Vec<String>,
    guarantees: Vec<String>,
    saturated: bool,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Internal constructor for contracts derived by the algebra.
    ///
    /// Derived contracts are built from already-saturated operand formulas,
    /// so they are marked saturated to prevent a second wrapping.
    pub(crate) fn derived(
        name: String,
        variables: Vec<Variable>,
        assumption: String,
        guarantee: String,
    ) -> Self {
        Self {
            name,
            variables,
            assumptions: vec![assumption],
            guarantees: vec![guarantee],
            saturated: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }

    pub fn guarantees(&self) -> &[String] {
        &self.guarantees
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Declare a variable. Identifiers are unique within a contract.
    pub fn add_variable(&mut self, variable: Variable) -> Result<(), CoreError> {
        if self.variables.iter().any(|v| v.name == variable.name) {
            return Err(CoreError::DuplicateVariable {
                contract: self.name.clone(),
                variable: variable.name,
            });
        }
        self.variables.push(variable);
        Ok(())
    }

    /// Append an assumption fragment, stored verbatim.
    pub fn add_assumption(&mut self, fragment: impl Into<String>) {
        self.assumptions.push(fragment.into());
    }

    /// Append a guarantee fragment, stored verbatim.
    pub fn add_guarantee(&mut self, fragment: impl Into<String>) {
        self.guarantees.push(fragment.into());
    }

    /// Parenthesized conjunction of all assumptions, `(TRUE)` when empty.
    pub fn assumption_formula(&self) -> String {
        ltl::conjunction(&self.assumptions)
    }

    /// Parenthesized conjunction of all guarantees.
    ///
    /// With `saturated = true` on a contract whose fragments have not been
    /// saturated in place, the conjunction is returned under the implication
    /// of [`Contract::assumption_formula`]. On an already-saturated contract
    /// both forms coincide.
    pub fn guarantee_formula(&self, saturated: bool) -> String {
        let conj = ltl::conjunction(&self.guarantees);
        if saturated && !self.saturated {
            ltl::implies(&self.assumption_formula(), &conj)
        } else {
            conj
        }
    }

    /// Rewrite each guarantee `g` to `(A -> g)` exactly once.
    pub fn saturate(&mut self) {
        if self.saturated {
            return;
        }
        let assumption = self.assumption_formula();
        for guarantee in &mut self.guarantees {
            *guarantee = ltl::implies(&assumption, guarantee);
        }
        self.saturated = true;
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Variables:")?;
        for variable in &self.variables {
            writeln!(f, "  {}", variable)?;
        }
        writeln!(f, "Assumptions:")?;
        for assumption in &self.assumptions {
            writeln!(f, "  {}", assumption)?;
        }
        writeln!(f, "Guarantees:")?;
        for guarantee in &self.guarantees {
            writeln!(f, "  {}", guarantee)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiter() -> Contract {
        let mut contract = Contract::new("waiter");
        contract
            .add_variable(Variable::new("request", "FALSE"))
            .unwrap();
        contract
            .add_variable(Variable::new("service", "FALSE"))
            .unwrap();
        contract.add_assumption("TRUE");
        contract.add_guarantee("G(!request -> X !service)");
        contract.add_guarantee("G(request -> X service)");
        contract
    }

    #[test]
    fn assumption_formula_is_parenthesized_conjunction() {
        let mut contract = Contract::new("c");
        contract.add_assumption("a");
        contract.add_assumption("b");
        assert_eq!(contract.assumption_formula(), "(a & b)");
    }

    #[test]
    fn empty_assumptions_yield_true() {
        let contract = Contract::new("c");
        assert_eq!(contract.assumption_formula(), "(TRUE)");
        assert_eq!(contract.guarantee_formula(false), "(TRUE)");
    }

    #[test]
    fn unsaturated_guarantee_formula_wraps_on_demand() {
        let mut contract = Contract::new("c");
        contract.add_assumption("x");
        contract.add_guarantee("y");
        assert_eq!(contract.guarantee_formula(false), "(y)");
        assert_eq!(contract.guarantee_formula(true), "((x) -> (y))");
    }

    #[test]
    fn saturate_rewrites_each_fragment() {
        let mut contract = waiter();
        contract.saturate();
        assert_eq!(
            contract.guarantees(),
            &[
                "((TRUE) -> G(!request -> X !service))".to_string(),
                "((TRUE) -> G(request -> X service))".to_string(),
            ]
        );
        assert!(contract.is_saturated());
    }

    #[test]
    fn saturate_is_idempotent() {
        let mut once = waiter();
        once.saturate();
        let mut twice = once.clone();
        twice.saturate();
        assert_eq!(once, twice);
        assert_eq!(
            once.guarantee_formula(true),
            twice.guarantee_formula(true)
        );
    }

    #[test]
    fn saturated_guarantee_formula_is_stable() {
        let mut contract = waiter();
        contract.saturate();
        // Once saturated, both forms coincide -- no double wrapping.
        assert_eq!(
            contract.guarantee_formula(true),
            contract.guarantee_formula(false)
        );
    }

    #[test]
    fn duplicate_variable_is_rejected() {
        let mut contract = Contract::new("c");
        contract
            .add_variable(Variable::new("request", "FALSE"))
            .unwrap();
        let err = contract
            .add_variable(Variable::new("request", "TRUE"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateVariable { .. }));
    }

    #[test]
    fn display_lists_all_fields() {
        let rendered = waiter().to_string();
        assert!(rendered.contains("Name: waiter"));
        assert!(rendered.contains("  request := FALSE"));
        assert!(rendered.contains("  G(request -> X service)"));
    }
}
