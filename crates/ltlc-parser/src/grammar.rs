//! Lexical configuration of the specification language.

/// The fixed lexical elements of the contract language.
///
/// Indentation depth is measured in tab stops of `tab_width` spaces after
/// literal tabs are expanded; `comment` introduces a line comment that
/// runs to the end of the line.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub tab_width: usize,
    pub comment: String,
    pub assignment: String,
    pub contract_header: String,
    pub name_header: String,
    pub variables_header: String,
    pub assumptions_header: String,
    pub guarantees_header: String,
    pub checks_header: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            tab_width: 2,
            comment: "##".to_string(),
            assignment: ":=".to_string(),
            contract_header: "CONTRACT:".to_string(),
            name_header: "NAME:".to_string(),
            variables_header: "VARIABLES:".to_string(),
            assumptions_header: "ASSUMPTIONS:".to_string(),
            guarantees_header: "GUARANTEES:".to_string(),
            checks_header: "CHECKS:".to_string(),
        }
    }
}
