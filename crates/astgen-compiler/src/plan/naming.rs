//! Names derived from types.

use std::collections::BTreeSet;

use astgen_core::{Primitive, Schema, SemanticType};

/// Base name of a type shape: `Expression`, `MaybeExpression`,
/// `ListMaybeSpreadElementExpression`, `MaybeListStatement`, `String`.
pub fn shape_name(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Node(name) | SemanticType::Enum(name) | SemanticType::Named(name) => {
            name.clone()
        }
        SemanticType::Value(Primitive::String) => "String".to_owned(),
        SemanticType::Value(Primitive::Boolean) => "Boolean".to_owned(),
        SemanticType::Value(Primitive::Double) => "Double".to_owned(),
        SemanticType::Nullable(inner) => format!("Maybe{}", shape_name(inner)),
        SemanticType::List(inner) => format!("List{}", shape_name(inner)),
        SemanticType::Union(members) => members
            .iter()
            .map(shape_name)
            .collect::<Vec<_>>()
            .join("Or"),
    }
}

/// Name of the alias covering every leaf.
///
/// A declared `Node` whose leaves are all the leaves already is that alias;
/// otherwise the first free name among `Node`, `Node2`, ...
pub fn any_node_name(schema: &Schema) -> String {
    let graph = schema.graph();
    if graph.has_node("Node") && schema.leaves_of("Node").len() == graph.leaves().len() {
        return "Node".to_owned();
    }
    let mut names = UniqueNames::default();
    for name in graph.node_names() {
        names.reserve(name);
    }
    for decl in graph.enums() {
        names.reserve(&decl.name);
    }
    names.unique("Node")
}

/// Collision-free names with numeric suffixes `2`, `3`, ...
#[derive(Clone, Debug, Default)]
pub struct UniqueNames {
    used: BTreeSet<String>,
}

impl UniqueNames {
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_owned());
    }

    pub fn unique(&mut self, base: &str) -> String {
        if self.used.insert(base.to_owned()) {
            return base.to_owned();
        }

        let mut counter = 2;
        loop {
            let name = format!("{base}{counter}");
            if self.used.insert(name.clone()) {
                return name;
            }
            counter += 1;
        }
    }
}
