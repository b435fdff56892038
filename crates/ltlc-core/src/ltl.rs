//! LTL formula string combinators.
//!
//! Obligations are built by parenthesized string composition of boolean
//! connectives over verbatim formula fragments. No simplification or
//! satisfiability reasoning happens here; the external model checker is
//! the sole judge of the formulas' truth.

/// Logical conjunction of two formula strings.
pub fn and(a: &str, b: &str) -> String {
    format!("({} & {})", a, b)
}

/// Logical disjunction of two formula strings.
pub fn or(a: &str, b: &str) -> String {
    format!("({} | {})", a, b)
}

/// Implication of `b` by `a`.
pub fn implies(a: &str, b: &str) -> String {
    format!("({} -> {})", a, b)
}

/// Logical negation of a formula string.
pub fn not(a: &str) -> String {
    format!("!{}", a)
}

/// Parenthesized conjunction of a fragment list, `(TRUE)` when empty.
pub fn conjunction(fragments: &[String]) -> String {
    if fragments.is_empty() {
        return "(TRUE)".to_string();
    }
    format!("({})", fragments.join(" & "))
}

/// The negated `LTLSPEC` obligation line for the model file.
///
/// The negation asks the engine to refute the property, so "specification
/// is false" in its report means the desired property holds.
pub fn spec(formula: &str) -> String {
    format!("\tLTLSPEC !{};\n", formula)
}
