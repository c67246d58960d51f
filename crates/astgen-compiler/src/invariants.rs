//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use astgen_core::{NodeGraph, SemanticType};

use crate::unions::verify_no_unions;

pub(crate) fn ensure_no_unions(graph: &NodeGraph) {
    if let Err(residual) = verify_no_unions(graph) {
        panic!("union elimination left `{residual}` (every union must become a node)");
    }
}

pub(crate) fn unreachable_shape(ty: &SemanticType) -> ! {
    panic!("emission reached shape `{ty}` (only node, value, enum, maybe and list survive elimination)")
}
