//! Model file generation.
//!
//! The emitted artifact has a fixed structure: the `MODULE main` header,
//! one boolean declaration per alphabet entry, one initial-value
//! assignment per entry in the same order, then one `LTLSPEC` obligation
//! per check in CheckList order. The per-check order is a hard contract:
//! the result parser correlates the engine's n-th verdict with the n-th
//! check purely by position.

use std::fs;
use std::path::Path;

use ltlc_core::{AlgebraError, CheckList, ContractSet};

use crate::error::SmvError;

/// Render the model file contents.
pub fn render_model(
    contracts: &ContractSet,
    checks: &CheckList,
) -> Result<String, AlgebraError> {
    let mut out = String::new();
    out.push_str("MODULE main\n");

    out.push_str("VAR\n");
    for (name, _) in contracts.alphabet() {
        out.push_str(&format!("\t{}: boolean;\n", name));
    }

    out.push_str("ASSIGN\n");
    for (name, init) in contracts.alphabet() {
        out.push_str(&format!("\tinit({}) := {};\n", name, init));
    }
    out.push('\n');

    for check in checks {
        out.push_str(&check.ltl_spec()?);
    }
    Ok(out)
}

/// Write the rendered model to `path` in full.
///
/// The file is closed before this returns, so the engine process only
/// ever sees a completely written model.
pub fn write_model(
    path: &Path,
    contracts: &ContractSet,
    checks: &CheckList,
) -> Result<(), SmvError> {
    let rendered = render_model(contracts, checks)?;
    fs::write(path, rendered).map_err(|source| SmvError::Generation {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltlc_core::{Check, CheckKind, CombineMode, Contract, Variable};

    fn contract(name: &str, guarantee: &str) -> Contract {
        let mut contract = Contract::new(name);
        contract
            .add_variable(Variable::new("request", "FALSE"))
            .unwrap();
        contract
            .add_variable(Variable::new("service", "FALSE"))
            .unwrap();
        contract.add_assumption("TRUE");
        contract.add_guarantee(guarantee);
        contract.saturate();
        contract
    }

    fn fixture() -> (ContractSet, CheckList) {
        let waiter = contract("waiter", "G(request -> X service)");
        let customer = contract("customer", "(F request)");

        let mut contracts = ContractSet::new();
        contracts.insert(waiter.clone()).unwrap();
        contracts.insert(customer.clone()).unwrap();

        let mut checks = CheckList::new();
        checks.push(
            Check::new(
                CheckKind::Compatibility(CombineMode::Composition),
                vec![waiter.clone(), customer.clone()],
            )
            .unwrap(),
        );
        checks.push(
            Check::new(
                CheckKind::Consistency(CombineMode::Composition),
                vec![waiter, customer],
            )
            .unwrap(),
        );
        (contracts, checks)
    }

    #[test]
    fn header_and_declarations_come_first() {
        let (contracts, checks) = fixture();
        let model = render_model(&contracts, &checks).unwrap();

        assert!(model.starts_with(
            "MODULE main\n\
             VAR\n\
             \trequest: boolean;\n\
             \tservice: boolean;\n\
             ASSIGN\n\
             \tinit(request) := FALSE;\n\
             \tinit(service) := FALSE;\n\n"
        ));
    }

    #[test]
    fn one_obligation_per_check_in_order() {
        let (contracts, checks) = fixture();
        let model = render_model(&contracts, &checks).unwrap();

        let obligations: Vec<&str> = model
            .lines()
            .filter(|line| line.contains("LTLSPEC"))
            .collect();
        assert_eq!(obligations.len(), 2);
        assert_eq!(
            obligations[0],
            checks.get(0).unwrap().ltl_spec().unwrap().trim_end()
        );
        assert_eq!(
            obligations[1],
            checks.get(1).unwrap().ltl_spec().unwrap().trim_end()
        );
    }

    #[test]
    fn declaration_and_assignment_counts_match_the_alphabet() {
        let (contracts, checks) = fixture();
        let model = render_model(&contracts, &checks).unwrap();

        assert_eq!(model.matches(": boolean;").count(), 2);
        assert_eq!(model.matches("init(").count(), 2);
    }

    #[test]
    fn write_model_persists_the_rendering() {
        let (contracts, checks) = fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.smv");

        write_model(&path, &contracts, &checks).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_model(&contracts, &checks).unwrap());
    }
}
