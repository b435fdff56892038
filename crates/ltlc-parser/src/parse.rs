//! The single-pass block parser.

use ltlc_core::{Check, CheckKind, CheckList, Contract, ContractSet, CoreError, Variable};

use crate::error::ParseError;
use crate::grammar::Grammar;

/// The parsed specification: all contracts plus the declared checks in
/// source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spec {
    pub contracts: ContractSet,
    pub checks: CheckList,
}

/// A cleaned input line: comment stripped, tabs expanded, depth measured.
struct Line {
    number: usize,
    depth: usize,
    text: String,
}

/// Which contract field subsequent data rows belong to.
#[derive(Clone, Copy)]
enum Field {
    Name,
    Variables,
    Assumptions,
    Guarantees,
}

/// An open contract block under construction.
struct ContractBlock {
    contract: Contract,
    named: bool,
    field: Option<Field>,
    opened_at: usize,
}

impl ContractBlock {
    fn new(opened_at: usize) -> Self {
        Self {
            contract: Contract::default(),
            named: false,
            field: None,
            opened_at,
        }
    }
}

enum Section {
    None,
    Contract(ContractBlock),
    Checks,
}

pub struct Parser {
    grammar: Grammar,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Grammar::default())
    }
}

impl Parser {
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parse a complete specification text.
    ///
    /// Single pass, non-backtracking; the whole input is consumed before
    /// anything is returned. A contract block closes when a line at or
    /// above its header depth is seen (that line is re-dispatched by the
    /// top-level scan) or at end of input.
    pub fn parse(&self, input: &str) -> Result<Spec, ParseError> {
        let mut spec = Spec::default();
        let mut section = Section::None;

        for (index, raw) in input.lines().enumerate() {
            let number = index + 1;
            let Some(line) = self.clean(raw, number)? else {
                continue;
            };

            if line.depth == 0 {
                if let Section::Contract(block) =
                    std::mem::replace(&mut section, Section::None)
                {
                    self.finish_contract(block, &mut spec.contracts)?;
                }
                section = if line.text == self.grammar.contract_header {
                    Section::Contract(ContractBlock::new(line.number))
                } else if line.text == self.grammar.checks_header {
                    Section::Checks
                } else {
                    return Err(ParseError::UnknownHeader {
                        line: line.number,
                        header: line.text,
                    });
                };
                continue;
            }

            match section {
                Section::None => {
                    return Err(ParseError::UnexpectedIndent {
                        line: line.number,
                        depth: line.depth,
                    });
                }
                Section::Contract(ref mut block) => self.contract_line(&line, block)?,
                Section::Checks => {
                    if line.depth != 1 {
                        return Err(ParseError::UnexpectedIndent {
                            line: line.number,
                            depth: line.depth,
                        });
                    }
                    self.check_row(&line, &spec.contracts, &mut spec.checks)?;
                }
            }
        }

        if let Section::Contract(block) = section {
            self.finish_contract(block, &mut spec.contracts)?;
        }

        Ok(spec)
    }

    /// Strip the comment suffix, expand tabs, and measure indentation.
    ///
    /// Returns `None` for lines that are blank once cleaned.
    fn clean(&self, raw: &str, number: usize) -> Result<Option<Line>, ParseError> {
        let uncommented = raw
            .split_once(self.grammar.comment.as_str())
            .map(|(head, _)| head)
            .unwrap_or(raw);
        let expanded = uncommented.replace('\t', &" ".repeat(self.grammar.tab_width));
        let text = expanded.trim_start();
        if text.trim_end().is_empty() {
            return Ok(None);
        }
        let spaces = expanded.len() - text.len();
        if spaces % self.grammar.tab_width != 0 {
            return Err(ParseError::RaggedIndent {
                line: number,
                spaces,
            });
        }
        Ok(Some(Line {
            number,
            depth: spaces / self.grammar.tab_width,
            text: text.trim_end().to_string(),
        }))
    }

    fn contract_line(&self, line: &Line, block: &mut ContractBlock) -> Result<(), ParseError> {
        match line.depth {
            1 => {
                block.field = Some(self.field_header(line)?);
                Ok(())
            }
            2 => self.data_row(line, block),
            _ => Err(ParseError::UnexpectedIndent {
                line: line.number,
                depth: line.depth,
            }),
        }
    }

    fn field_header(&self, line: &Line) -> Result<Field, ParseError> {
        let grammar = &self.grammar;
        if line.text == grammar.name_header {
            Ok(Field::Name)
        } else if line.text == grammar.variables_header {
            Ok(Field::Variables)
        } else if line.text == grammar.assumptions_header {
            Ok(Field::Assumptions)
        } else if line.text == grammar.guarantees_header {
            Ok(Field::Guarantees)
        } else {
            Err(ParseError::UnknownFieldHeader {
                line: line.number,
                header: line.text.clone(),
            })
        }
    }

    fn data_row(&self, line: &Line, block: &mut ContractBlock) -> Result<(), ParseError> {
        match block.field {
            None => Err(ParseError::MissingFieldHeader { line: line.number }),
            Some(Field::Name) => {
                if block.named {
                    return Err(ParseError::DuplicateNameRow { line: line.number });
                }
                block.contract.set_name(&line.text);
                block.named = true;
                Ok(())
            }
            Some(Field::Variables) => {
                let (name, init) = line
                    .text
                    .split_once(self.grammar.assignment.as_str())
                    .ok_or_else(|| ParseError::MalformedVariable {
                        line: line.number,
                        row: line.text.clone(),
                    })?;
                block
                    .contract
                    .add_variable(Variable::new(name.trim(), init.trim()))
                    .map_err(|err| match err {
                        CoreError::DuplicateVariable { variable, .. } => {
                            ParseError::DuplicateVariable {
                                line: line.number,
                                variable,
                            }
                        }
                        other => ParseError::Internal {
                            line: line.number,
                            message: other.to_string(),
                        },
                    })
            }
            Some(Field::Assumptions) => {
                block.contract.add_assumption(&line.text);
                Ok(())
            }
            Some(Field::Guarantees) => {
                block.contract.add_guarantee(&line.text);
                Ok(())
            }
        }
    }

    /// Close a contract block: saturate its guarantees and register it.
    fn finish_contract(
        &self,
        block: ContractBlock,
        contracts: &mut ContractSet,
    ) -> Result<(), ParseError> {
        if !block.named {
            return Err(ParseError::MissingName {
                line: block.opened_at,
            });
        }
        let mut contract = block.contract;
        contract.saturate();
        contracts.insert(contract).map_err(|err| match err {
            CoreError::DuplicateContract { name } => ParseError::DuplicateContract {
                line: block.opened_at,
                name,
            },
            CoreError::ConflictingInit {
                variable,
                left,
                right,
            } => ParseError::ConflictingInit {
                line: block.opened_at,
                variable,
                left,
                right,
            },
            other => ParseError::Internal {
                line: block.opened_at,
                message: other.to_string(),
            },
        })
    }

    /// Parse one `type(name1, name2)` row, resolving operands against the
    /// contracts declared so far.
    fn check_row(
        &self,
        line: &Line,
        contracts: &ContractSet,
        checks: &mut CheckList,
    ) -> Result<(), ParseError> {
        let malformed = || ParseError::MalformedCheck {
            line: line.number,
            row: line.text.clone(),
        };
        let (keyword, rest) = line.text.split_once('(').ok_or_else(malformed)?;
        let (args, _) = rest.split_once(')').ok_or_else(malformed)?;

        let keyword = keyword.trim();
        let kind =
            CheckKind::from_keyword(keyword).ok_or_else(|| ParseError::UnknownCheckType {
                line: line.number,
                keyword: keyword.to_string(),
            })?;

        let mut operands = Vec::new();
        for name in args.split(',') {
            let name = name.trim();
            let contract =
                contracts
                    .get(name)
                    .map_err(|_| ParseError::UnknownContract {
                        line: line.number,
                        name: name.to_string(),
                    })?;
            operands.push(contract.clone());
        }

        let check = Check::new(kind, operands).map_err(|err| match err {
            CoreError::CheckArity {
                expected, found, ..
            } => ParseError::CheckArity {
                line: line.number,
                expected,
                found,
            },
            other => ParseError::Internal {
                line: line.number,
                message: other.to_string(),
            },
        })?;
        checks.push(check);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltlc_core::CombineMode;

    fn parse(input: &str) -> Result<Spec, ParseError> {
        Parser::default().parse(input)
    }

    const MINIMAL: &str = "\
CONTRACT:
  NAME:
    solo
  VARIABLES:
    x := FALSE
  ASSUMPTIONS:
    TRUE
  GUARANTEES:
    G(x)
";

    #[test]
    fn parses_a_minimal_contract() {
        let spec = parse(MINIMAL).unwrap();
        assert_eq!(spec.contracts.len(), 1);

        let solo = spec.contracts.get("solo").unwrap();
        assert_eq!(solo.variables(), &[Variable::new("x", "FALSE")]);
        assert_eq!(solo.assumptions(), &["TRUE".to_string()]);
        // Saturated as the block closed.
        assert_eq!(solo.guarantees(), &["((TRUE) -> G(x))".to_string()]);
        assert!(solo.is_saturated());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = format!("## header comment\n\n{}  ## trailing\n", MINIMAL);
        let spec = parse(&input).unwrap();
        assert_eq!(spec.contracts.len(), 1);
    }

    #[test]
    fn inline_comments_are_stripped_from_data_rows() {
        let input = "\
CONTRACT:
  NAME:
    solo  ## the only contract
  GUARANTEES:
    G(x)  ## always x
";
        let spec = parse(input).unwrap();
        let solo = spec.contracts.get("solo").unwrap();
        assert_eq!(solo.guarantees(), &["((TRUE) -> G(x))".to_string()]);
    }

    #[test]
    fn tabs_count_as_one_tab_stop() {
        let input = "CONTRACT:\n\tNAME:\n\t\tsolo\n";
        let spec = parse(input).unwrap();
        assert!(spec.contracts.contains("solo"));
    }

    #[test]
    fn ragged_indent_is_an_error() {
        let input = "CONTRACT:\n NAME:\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err,
            ParseError::RaggedIndent { line: 2, spaces: 1 }
        ));
    }

    #[test]
    fn unknown_top_level_header_is_an_error() {
        let err = parse("MODULES:\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownHeader { line: 1, .. }));
    }

    #[test]
    fn unknown_field_header_is_an_error() {
        let input = "CONTRACT:\n  PROMISES:\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFieldHeader { line: 2, .. }));
    }

    #[test]
    fn data_row_before_field_header_is_an_error() {
        let input = "CONTRACT:\n    stray\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::MissingFieldHeader { line: 2 }));
    }

    #[test]
    fn contract_without_name_is_an_error() {
        let input = "CONTRACT:\n  GUARANTEES:\n    G(x)\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::MissingName { line: 1 }));
    }

    #[test]
    fn second_name_row_is_an_error() {
        let input = "CONTRACT:\n  NAME:\n    one\n    two\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateNameRow { line: 4 }));
    }

    #[test]
    fn malformed_variable_row_is_an_error() {
        let input = "CONTRACT:\n  NAME:\n    solo\n  VARIABLES:\n    x = FALSE\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::MalformedVariable { line: 5, .. }));
    }

    #[test]
    fn duplicate_contract_name_is_an_error() {
        let input = "\
CONTRACT:
  NAME:
    twin
CONTRACT:
  NAME:
    twin
";
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateContract { line: 4, .. }
        ));
    }

    #[test]
    fn unknown_check_type_is_an_error() {
        let input = format!("{}CHECKS:\n  reachability(solo, solo)\n", MINIMAL);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::UnknownCheckType { .. }));
    }

    #[test]
    fn unresolved_check_operand_is_an_error() {
        let input = format!("{}CHECKS:\n  consistency(solo, ghost)\n", MINIMAL);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::UnknownContract { .. }));
    }

    #[test]
    fn wrong_check_arity_is_an_error() {
        let input = format!("{}CHECKS:\n  consistency(solo)\n", MINIMAL);
        let err = parse(&input).unwrap_err();
        assert!(matches!(
            err,
            ParseError::CheckArity {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn malformed_check_row_is_an_error() {
        let input = format!("{}CHECKS:\n  consistency solo, solo\n", MINIMAL);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::MalformedCheck { .. }));
    }

    #[test]
    fn checks_keep_source_order_and_modes() {
        let input = "\
CONTRACT:
  NAME:
    a
CONTRACT:
  NAME:
    b
CHECKS:
  Consistency(a, b)
  refinement(a, b)
  COMPATIBILITY(b, a)
";
        let spec = parse(input).unwrap();
        assert_eq!(spec.checks.len(), 3);
        assert_eq!(
            spec.checks.get(0).unwrap().kind(),
            CheckKind::Consistency(CombineMode::Composition)
        );
        assert_eq!(spec.checks.get(1).unwrap().kind(), CheckKind::Refinement);
        assert_eq!(
            spec.checks.get(2).unwrap().kind(),
            CheckKind::Compatibility(CombineMode::Composition)
        );
        // Operand order is preserved as written.
        let operands: Vec<&str> = spec
            .checks
            .get(2)
            .unwrap()
            .operands()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(operands, vec!["b", "a"]);
    }
}
