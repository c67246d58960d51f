//! Reference runtime for astgen schemas.
//!
//! Executes the semantics of the emitted code dynamically: trees are
//! `Value`s checked against a `Schema`, and the director, reducers, codec
//! and path accessors behave like their generated counterparts.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    AstNode, DeserializeError, Director, Fields, Flattener, Monoid, Monoidal, Path, RangeChecker,
    RangeError, Reconstructing, Reduced, Reducer, RuntimeError, Span, Thunk, ThunkedDirector,
    ThunkedReducer, Value, VerifyError, deserialize, flatten, fold_fields, serialize, verify,
};
