//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use astgen_core::SemanticType;

use super::{AstNode, Value};

pub(super) fn not_reached(interface: &str, kind: &str) -> ! {
    panic!("dispatch of `{interface}` found no child holding `{kind}` (trees are verified before dispatch)")
}

pub(super) fn ensure_field<'a>(node: &'a AstNode, name: &str) -> &'a Value {
    node.field(name).unwrap_or_else(|| {
        panic!(
            "`{}` has no field `{name}` (trees are verified before dispatch)",
            node.kind
        )
    })
}

pub(super) fn mismatched(ty: &SemanticType, value: &Value) -> ! {
    panic!(
        "dispatch of `{ty}` reached a {} (trees are verified before dispatch)",
        value.kind_name()
    )
}
