//! The contract algebra: composition, conjunction, and refinement.
//!
//! All operators are pure. They never mutate their operands and always
//! return a freshly derived [`Contract`] or a formula string. Operands are
//! expected to be saturated; [`Contract::guarantee_formula`] with
//! `saturated = true` makes that explicit at every use site.
//!
//! Chained operands fold left over an immutable sequence, so
//! `compose_all(&[a, b, c])` is `compose(&compose(&a, &b)?, &c)`.

use serde::{Deserialize, Serialize};

use crate::contract::{Contract, Variable};
use crate::error::AlgebraError;
use crate::ltl;

/// Which combinator produces the operand contract for a compatibility or
/// consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineMode {
    Composition,
    Conjunction,
}

impl CombineMode {
    pub fn apply(self, a: &Contract, b: &Contract) -> Result<Contract, AlgebraError> {
        match self {
            CombineMode::Composition => compose(a, b),
            CombineMode::Conjunction => conjoin(a, b),
        }
    }
}

/// Compose two contracts.
///
/// The composite assumes `(Aa & Ab) | !(Ga & Gb)`: the composition is
/// total except where the operands' own guarantees already fail. Its
/// guarantee is `Ga & Gb`.
pub fn compose(a: &Contract, b: &Contract) -> Result<Contract, AlgebraError> {
    let name = format!("{}_comp_{}", a.name(), b.name());
    let variables = merge_variables(a, b)?;
    let guarantees = ltl::and(&a.guarantee_formula(true), &b.guarantee_formula(true));
    let assumption = ltl::or(
        &ltl::and(&a.assumption_formula(), &b.assumption_formula()),
        &ltl::not(&guarantees),
    );
    Ok(Contract::derived(name, variables, assumption, guarantees))
}

/// Conjoin two contracts: assumption `Aa | Ab`, guarantee `Ga & Gb`.
pub fn conjoin(a: &Contract, b: &Contract) -> Result<Contract, AlgebraError> {
    let name = format!("{}_conj_{}", a.name(), b.name());
    let variables = merge_variables(a, b)?;
    let assumption = ltl::or(&a.assumption_formula(), &b.assumption_formula());
    let guarantees = ltl::and(&a.guarantee_formula(true), &b.guarantee_formula(true));
    Ok(Contract::derived(name, variables, assumption, guarantees))
}

/// Left-fold composition over a non-empty sequence of contracts.
pub fn compose_all(contracts: &[Contract]) -> Result<Contract, AlgebraError> {
    let (first, rest) = contracts.split_first().ok_or(AlgebraError::EmptyFold)?;
    rest.iter()
        .try_fold(first.clone(), |acc, contract| compose(&acc, contract))
}

/// Left-fold conjunction over a non-empty sequence of contracts.
pub fn conjoin_all(contracts: &[Contract]) -> Result<Contract, AlgebraError> {
    let (first, rest) = contracts.split_first().ok_or(AlgebraError::EmptyFold)?;
    rest.iter()
        .try_fold(first.clone(), |acc, contract| conjoin(&acc, contract))
}

/// Obligation formula for the compatibility of two contracts: is the
/// combined assumption unsatisfiable?
pub fn compatibility(
    a: &Contract,
    b: &Contract,
    mode: CombineMode,
) -> Result<String, AlgebraError> {
    Ok(mode.apply(a, b)?.assumption_formula())
}

/// Obligation formula for the consistency of two contracts: is the
/// combined guarantee unsatisfiable?
pub fn consistency(
    a: &Contract,
    b: &Contract,
    mode: CombineMode,
) -> Result<String, AlgebraError> {
    Ok(mode.apply(a, b)?.guarantee_formula(true))
}

/// The formula asserting that `a` refines `b`.
///
/// `a` must accept every environment `b` accepts (`Ab -> Aa`) and deliver
/// every guarantee `b` promises (`Ga -> Gb`). Operand order matters:
/// swapping candidate and specification changes the proof obligation.
pub fn refines(a: &Contract, b: &Contract) -> String {
    ltl::and(
        &ltl::implies(&b.assumption_formula(), &a.assumption_formula()),
        &ltl::implies(&a.guarantee_formula(true), &b.guarantee_formula(true)),
    )
}

/// Union of both operands' variables, deduplicated by identifier.
///
/// The same identifier with two different initial values has no meaningful
/// union, so it is rejected rather than resolved in either direction.
fn merge_variables(a: &Contract, b: &Contract) -> Result<Vec<Variable>, AlgebraError> {
    let mut merged: Vec<Variable> = a.variables().to_vec();
    for variable in b.variables() {
        match merged.iter().find(|v| v.name == variable.name) {
            None => merged.push(variable.clone()),
            Some(existing) if existing.init == variable.init => {}
            Some(existing) => {
                return Err(AlgebraError::ConflictingInit {
                    variable: variable.name.clone(),
                    left: existing.init.clone(),
                    right: variable.init.clone(),
                });
            }
        }
    }
    Ok(merged)
}
