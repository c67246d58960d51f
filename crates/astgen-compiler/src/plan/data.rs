//! Data-class plan: one entry per node and enum, in declaration order.

use astgen_core::{NodeKind, Schema, SemanticType};

use super::naming::any_node_name;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: SemanticType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeEntry {
    pub name: String,
    pub kind: NodeKind,
    /// Class-like parent, at most one.
    pub extends: Option<String>,
    /// Attribute-less parents.
    pub implements: Vec<String>,
    pub fields: Vec<Field>,
    /// Every attribute, own and inherited, in table order.
    pub constructor: Vec<Field>,
    pub children: Vec<String>,
    pub leaves: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumEntry {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPlan {
    pub nodes: Vec<NodeEntry>,
    pub enums: Vec<EnumEntry>,
    /// Alias naming the union of every leaf.
    pub any_node: String,
}

impl DataPlan {
    pub fn build(schema: &Schema) -> Self {
        let graph = schema.graph();
        let nodes = graph
            .nodes()
            .map(|decl| {
                let (class_like, interfaces): (Vec<&String>, Vec<&String>) = decl
                    .parents
                    .iter()
                    .partition(|p| !graph.ensure_node(p).attributes.is_empty());
                NodeEntry {
                    name: decl.name.clone(),
                    kind: decl.kind(),
                    extends: class_like.first().map(|p| p.to_string()),
                    implements: interfaces.into_iter().cloned().collect(),
                    fields: decl
                        .own_attributes()
                        .map(|a| Field {
                            name: a.name.clone(),
                            ty: a.ty.clone(),
                        })
                        .collect(),
                    constructor: decl
                        .attributes
                        .iter()
                        .map(|a| Field {
                            name: a.name.clone(),
                            ty: a.ty.clone(),
                        })
                        .collect(),
                    children: decl.children.clone(),
                    leaves: schema.leaves_of(&decl.name).to_vec(),
                }
            })
            .collect();

        let enums = graph
            .enums()
            .map(|decl| EnumEntry {
                name: decl.name.clone(),
                values: decl.values.clone(),
            })
            .collect();

        Self {
            nodes,
            enums,
            any_node: any_node_name(schema),
        }
    }

    pub fn node(&self, name: &str) -> Option<&NodeEntry> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Leaf entries sorted by name.
    pub fn leaves(&self) -> Vec<&NodeEntry> {
        let mut leaves: Vec<&NodeEntry> = self
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Leaf)
            .collect();
        leaves.sort_by(|a, b| a.name.cmp(&b.name));
        leaves
    }
}
