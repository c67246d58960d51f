#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for astgen.
//!
//! Three layers:
//! - **Parse tree** (`idl`): what the grammar says, unresolved
//! - **Semantic layer** (`types`, `graph`): resolved types, the node table
//!   and its inheritance edges
//! - **Frozen layer** (`schema`, `fold`): graph plus derived facts, shared by
//!   emitters and the reference runtime

pub mod colors;
pub mod dump;
pub mod fold;
pub mod graph;
pub mod idl;
pub mod schema;
pub mod span;
pub mod types;
pub mod utils;

mod invariants;

pub use colors::Colors;
pub use dump::SchemaPrinter;
pub use fold::{FoldForm, FoldPlan};
pub use graph::{Attribute, EnumDecl, NodeDecl, NodeGraph, NodeKind, NodeOrigin};
pub use schema::{Facts, Schema};
pub use span::TextRange;
pub use types::{Primitive, SemanticType};
