//! The node graph: node table, enum table, named-type table and the
//! inheritance edges between nodes.
//!
//! Built incrementally by the resolver and the union eliminator through
//! `insert_*`/`add_edge`; read-only for every later stage.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::SemanticType;

// ============================================================================
// Declarations
// ============================================================================

/// Where a node came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum NodeOrigin {
    /// `interface Name { ... }` in the grammar.
    Declared,
    /// `typedef (A or B) Name;`
    Typedef { members: Vec<String> },
    /// Anonymous `(A or B)` written inline in an attribute type.
    Synthetic { members: Vec<String> },
}

impl NodeOrigin {
    /// Union member signature, for union-derived nodes.
    pub fn members(&self) -> Option<&[String]> {
        match self {
            NodeOrigin::Declared => None,
            NodeOrigin::Typedef { members } | NodeOrigin::Synthetic { members } => Some(members),
        }
    }

    /// Tie-break rank: declared nodes first, then typedef unions, then anonymous ones.
    pub fn rank(&self) -> u8 {
        match self {
            NodeOrigin::Declared => 0,
            NodeOrigin::Typedef { .. } => 1,
            NodeOrigin::Synthetic { .. } => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SemanticType,
    pub inherited: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: SemanticType, inherited: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            inherited,
        }
    }

    pub fn is_stateful(&self) -> bool {
        self.ty.is_stateful()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeDecl {
    pub name: String,
    #[serde(flatten)]
    pub origin: NodeOrigin,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl NodeDecl {
    pub fn new(name: impl Into<String>, origin: NodeOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
            parents: Vec::new(),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn kind(&self) -> NodeKind {
        if self.is_leaf() {
            NodeKind::Leaf
        } else if self.attributes.is_empty() {
            NodeKind::Interface
        } else {
            NodeKind::AbstractClass
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn stateful_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_stateful())
    }

    pub fn own_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| !a.inherited)
    }
}

/// Emission-relevant classification of a node.
///
/// Only `Leaf` is instantiable. `Interface` carries no attributes and is a
/// pure dispatch point; `AbstractClass` contributes inherited attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Leaf,
    AbstractClass,
    Interface,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.values.iter().position(|v| v == token)
    }
}

// ============================================================================
// Graph
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeGraph {
    nodes: IndexMap<String, NodeDecl>,
    enums: IndexMap<String, EnumDecl>,
    #[serde(rename = "namedTypes")]
    named_types: IndexMap<String, SemanticType>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, name: &str) -> Option<&NodeDecl> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut NodeDecl> {
        self.nodes.get_mut(name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Insert a node, returning the previous one with the same name.
    pub fn insert_node(&mut self, decl: NodeDecl) -> Option<NodeDecl> {
        self.nodes.insert(decl.name.clone(), decl)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut NodeDecl> {
        self.nodes.values_mut()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.get(name)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn insert_enum(&mut self, decl: EnumDecl) -> Option<EnumDecl> {
        self.enums.insert(decl.name.clone(), decl)
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDecl> {
        self.enums.values()
    }

    pub fn named_type(&self, name: &str) -> Option<&SemanticType> {
        self.named_types.get(name)
    }

    pub fn has_named_type(&self, name: &str) -> bool {
        self.named_types.contains_key(name)
    }

    pub fn insert_named_type(&mut self, name: impl Into<String>, ty: SemanticType) {
        self.named_types.insert(name.into(), ty);
    }

    pub fn named_types(&self) -> impl Iterator<Item = (&str, &SemanticType)> {
        self.named_types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add `child → parent` and `parent → child` edges unless already present.
    ///
    /// Returns whether anything changed. Both nodes must exist.
    pub fn add_edge(&mut self, child: &str, parent: &str) -> bool {
        let mut changed = false;
        let child_decl = self.ensure_node_mut(child);
        if !child_decl.parents.iter().any(|p| p == parent) {
            child_decl.parents.push(parent.to_owned());
            changed = true;
        }
        let parent_decl = self.ensure_node_mut(parent);
        if !parent_decl.children.iter().any(|c| c == child) {
            parent_decl.children.push(child.to_owned());
            changed = true;
        }
        changed
    }

    pub fn is_leaf(&self, name: &str) -> bool {
        self.ensure_node(name).is_leaf()
    }

    /// Leaf names in sorted order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .nodes
            .values()
            .filter(|n| n.is_leaf())
            .map(|n| n.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Concrete descendants of `name` (the node itself when it is a leaf).
    pub fn leaves_of(&self, name: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut visited = BTreeSet::new();
        self.collect_leaves(name, &mut out, &mut visited);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        name: &'a str,
        out: &mut BTreeSet<String>,
        visited: &mut BTreeSet<&'a str>,
    ) {
        if !visited.insert(name) {
            return;
        }
        let decl = self.ensure_node(name);
        if decl.is_leaf() {
            out.insert(decl.name.clone());
            return;
        }
        for child in &decl.children {
            self.collect_leaves(child, out, visited);
        }
    }

    /// Whether `sub` is `sup` or reaches it through parent edges.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }
        let mut stack = vec![sub];
        let mut visited = BTreeSet::new();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(decl) = self.node(current) else {
                continue;
            };
            for parent in &decl.parents {
                if parent == sup {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    /// Every attribute type in the graph, with its owning node.
    pub fn attribute_types(&self) -> impl Iterator<Item = (&NodeDecl, &Attribute)> {
        self.nodes
            .values()
            .flat_map(|n| n.attributes.iter().map(move |a| (n, a)))
    }
}
