//! astgen compiler: IDL front end, type normalization and code emitters.
//!
//! The pipeline, one module per stage:
//! - `parser` - lexer and recursive-descent parser for the WebIDL subset
//! - `order` - attribute-order table reader
//! - `resolve` - names, inheritance and attribute types
//! - `unions` - union elimination via interface nodes
//! - `facts` - leaf sets and max-super
//! - `plan` - target-independent emission plans
//! - `typegen` - target renderers (TypeScript)
//! - `generator` - the `Generator` facade tying the stages together

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod facts;
pub mod generator;
pub mod order;
pub mod parser;
pub mod plan;
pub mod resolve;
pub mod source_map;
pub mod typegen;
pub mod unions;

mod invariants;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod order_tests;

pub use config::Config;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use generator::{Analysis, GeneratedFile, Generator, Output};
pub use source_map::{SourceId, SourceKind, SourceMap};

/// Errors that stop generation. Each carries every diagnostic collected so
/// far, warnings included.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("grammar parsing failed with {} errors", .0.error_count())]
    GrammarParse(Diagnostics),

    #[error("attribute order table is invalid ({} errors)", .0.error_count())]
    Order(Diagnostics),

    #[error("grammar analysis failed with {} errors", .0.error_count())]
    Analysis(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::GrammarParse(d) | Error::Order(d) | Error::Analysis(d) => d,
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
