//! Structural path accessors: one per (leaf, attribute).

use astgen_core::{Schema, SemanticType};

use super::naming::UniqueNames;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPlan {
    /// Sorted by leaf, then attribute order.
    pub accessors: Vec<Accessor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    /// `Leaf_attribute`.
    pub name: String,
    pub leaf: String,
    pub attribute: String,
    /// Takes an index: the attribute is a list or an optional list.
    pub indexed: bool,
    /// The indexed list itself may be null.
    pub nullable: bool,
    /// The addressed value may be null; `apply` reports it as absent.
    pub optional: bool,
    /// Type of what `apply` returns when present, never nullable.
    pub element: SemanticType,
}

impl PathPlan {
    pub fn build(schema: &Schema) -> Self {
        let graph = schema.graph();
        let mut unique = UniqueNames::default();
        for name in graph.node_names() {
            unique.reserve(name);
        }

        let mut accessors = Vec::new();
        for leaf in graph.leaves() {
            for attr in &schema.node(leaf).attributes {
                let (indexed, nullable, addressed) = match &attr.ty {
                    SemanticType::List(inner) => (true, false, &**inner),
                    SemanticType::Nullable(inner) => match &**inner {
                        SemanticType::List(element) => (true, true, &**element),
                        _ => (false, false, &attr.ty),
                    },
                    other => (false, false, other),
                };
                let (optional, element) = match addressed {
                    SemanticType::Nullable(inner) => (true, (**inner).clone()),
                    other => (false, other.clone()),
                };
                accessors.push(Accessor {
                    name: unique.unique(&format!("{leaf}_{}", attr.name)),
                    leaf: leaf.to_owned(),
                    attribute: attr.name.clone(),
                    indexed,
                    nullable,
                    optional,
                    element,
                });
            }
        }

        Self { accessors }
    }

    pub fn accessor(&self, leaf: &str, attribute: &str) -> Option<&Accessor> {
        self.accessors
            .iter()
            .find(|a| a.leaf == leaf && a.attribute == attribute)
    }
}
