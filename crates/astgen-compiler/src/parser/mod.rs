//! Lexer and recursive-descent parser for the interface-description grammar.
//!
//! Produces the `astgen_core::idl` parse tree. Syntax errors become
//! diagnostics; the parser recovers at `;` and `}` so one run reports as
//! many problems as possible.

mod core;
mod grammar;
pub mod lexer;
pub mod syntax_kind;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod parser_tests;

use astgen_core::idl::Grammar;

pub use core::Parser;
pub use lexer::{Token, lex, token_text};
pub use syntax_kind::SyntaxKind;

use crate::SourceId;
use crate::diagnostics::Diagnostics;

/// Parse result: the tree is always produced, possibly partial.
#[derive(Debug, Clone)]
pub struct Parse {
    pub grammar: Grammar,
    pub diagnostics: Diagnostics,
}

pub fn parse(source: &str, source_id: SourceId) -> Parse {
    Parser::new(source, source_id, lex(source)).parse_grammar()
}
