//! Frozen graph plus derived facts: the immutable input of every emitter
//! and of the reference runtime.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{NodeDecl, NodeGraph};

/// Per-node facts computed once after union elimination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facts {
    /// Concrete descendants of every node, sorted by name.
    pub leaves: IndexMap<String, Vec<String>>,
    /// Widest type a structure-preserving rewrite of each leaf may return.
    #[serde(rename = "maxSuper")]
    pub max_super: IndexMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
    graph: NodeGraph,
    facts: Facts,
}

impl Schema {
    pub fn new(graph: NodeGraph, facts: Facts) -> Self {
        Self { graph, facts }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn facts(&self) -> &Facts {
        &self.facts
    }

    pub fn node(&self, name: &str) -> &NodeDecl {
        self.graph.ensure_node(name)
    }

    pub fn leaves_of(&self, name: &str) -> &[String] {
        self.ensure_leaves(name)
    }

    pub fn max_super(&self, leaf: &str) -> &str {
        self.ensure_max_super(leaf)
    }

    /// Whether a node of concrete kind `kind` may fill a slot typed `target`.
    pub fn is_assignable(&self, kind: &str, target: &str) -> bool {
        self.facts
            .leaves
            .get(target)
            .is_some_and(|leaves| leaves.binary_search_by(|l| l.as_str().cmp(kind)).is_ok())
    }

    /// Concrete child of `interface` (in declaration order) whose subtree holds `kind`.
    pub fn dispatch_child(&self, interface: &str, kind: &str) -> Option<&str> {
        self.node(interface)
            .children
            .iter()
            .find(|child| self.is_assignable(kind, child))
            .map(String::as_str)
    }
}
