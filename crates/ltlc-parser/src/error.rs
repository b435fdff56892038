//! Parse error types.
//!
//! Every variant carries the 1-based source line number so a failed run
//! can point at the offending line. Parse errors are fatal: nothing
//! downstream runs on a structurally invalid specification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// Leading whitespace is not a whole number of tab stops.
    #[error("line {line}: indentation of {spaces} spaces is not a whole number of tab stops")]
    RaggedIndent { line: usize, spaces: usize },

    /// A top-level line that is neither `CONTRACT:` nor `CHECKS:`.
    #[error("line {line}: unknown header '{header}'")]
    UnknownHeader { line: usize, header: String },

    /// A contract field header that is not NAME/VARIABLES/ASSUMPTIONS/GUARANTEES.
    #[error("line {line}: unknown contract field header '{header}'")]
    UnknownFieldHeader { line: usize, header: String },

    /// A line indented deeper (or shallower) than its block allows.
    #[error("line {line}: unexpected indentation depth {depth}")]
    UnexpectedIndent { line: usize, depth: usize },

    /// A data row appeared before any field header in a contract block.
    #[error("line {line}: data row outside any contract field")]
    MissingFieldHeader { line: usize },

    /// A second data row under NAME.
    #[error("line {line}: contract name is already set")]
    DuplicateNameRow { line: usize },

    /// A contract block closed without a NAME row.
    #[error("line {line}: contract block has no NAME")]
    MissingName { line: usize },

    /// A VARIABLES row without the assignment token.
    #[error("line {line}: malformed variable row '{row}'")]
    MalformedVariable { line: usize, row: String },

    /// The same identifier declared twice within one contract.
    #[error("line {line}: duplicate variable '{variable}'")]
    DuplicateVariable { line: usize, variable: String },

    /// A check row without the `type(a, b)` shape.
    #[error("line {line}: malformed check row '{row}'")]
    MalformedCheck { line: usize, row: String },

    /// A check keyword outside the registry.
    #[error("line {line}: unknown check type '{keyword}'")]
    UnknownCheckType { line: usize, keyword: String },

    /// A check with the wrong number of operand contracts.
    #[error("line {line}: check takes exactly {expected} contracts, got {found}")]
    CheckArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A check operand naming no declared contract.
    #[error("line {line}: unknown contract '{name}'")]
    UnknownContract { line: usize, name: String },

    /// Two contract blocks with the same name.
    #[error("line {line}: duplicate contract name '{name}'")]
    DuplicateContract { line: usize, name: String },

    /// An identifier re-declared with a different initial value.
    #[error("line {line}: conflicting initial values for variable '{variable}': '{left}' vs '{right}'")]
    ConflictingInit {
        line: usize,
        variable: String,
        left: String,
        right: String,
    },

    /// A core-model error with no dedicated variant.
    #[error("line {line}: {message}")]
    Internal { line: usize, message: String },
}
