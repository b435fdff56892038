//! Parser for the indentation-based contract specification language.
//!
//! The language is block-structured: `CONTRACT:` and `CHECKS:` headers at
//! depth zero open blocks, field headers (`NAME:`, `VARIABLES:`,
//! `ASSUMPTIONS:`, `GUARANTEES:`) sit one tab stop deeper, and data rows
//! one deeper still. [`Parser::parse`] makes a single non-backtracking
//! pass over the whole input and produces a [`Spec`]: the populated
//! [`ltlc_core::ContractSet`] plus the ordered [`ltlc_core::CheckList`].
//!
//! The lexical shape of the language (tab width, comment marker, headers)
//! is carried by a [`Grammar`] value rather than module constants, so an
//! alternate grammar needs no global state.

pub mod error;
pub mod grammar;
mod parse;

pub use error::ParseError;
pub use grammar::Grammar;
pub use parse::{Parser, Spec};
