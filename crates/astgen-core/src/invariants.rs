//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{NodeDecl, NodeGraph, Schema};

impl NodeGraph {
    pub fn ensure_node(&self, name: &str) -> &NodeDecl {
        self.node(name).unwrap_or_else(|| {
            panic!("NodeGraph: node `{name}` not found (edges must only name registered nodes)")
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, name: &str) -> &mut NodeDecl {
        self.node_mut(name).unwrap_or_else(|| {
            panic!("NodeGraph: node `{name}` not found (edges must only name registered nodes)")
        })
    }
}

impl Schema {
    pub(crate) fn ensure_leaves(&self, name: &str) -> &[String] {
        self.facts()
            .leaves
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_else(|| panic!("Schema: no leaf set for `{name}` (facts cover every node)"))
    }

    pub(crate) fn ensure_max_super(&self, leaf: &str) -> &str {
        self.facts()
            .max_super
            .get(leaf)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("Schema: no max-super for `{leaf}` (facts cover every leaf)"))
    }
}
