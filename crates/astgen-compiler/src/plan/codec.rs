//! JSON serializer/deserializer plan.

use std::collections::HashMap;

use astgen_core::{Primitive, Schema, SemanticType};
use indexmap::IndexSet;

use super::naming::{UniqueNames, shape_name};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecPlan {
    pub any_node: String,
    /// Every leaf, sorted by name.
    pub leaves: Vec<CodecLeaf>,
    /// One decoder per attribute shape, sorted by name.
    pub decoders: Vec<Decoder>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecLeaf {
    pub node: String,
    /// Attribute slots in table order.
    pub entries: Vec<CodecEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecEntry {
    pub attribute: String,
    pub ty: SemanticType,
    pub decoder: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoder {
    pub name: String,
    pub shape: SemanticType,
    pub body: DecoderBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderBody {
    /// Any node whose kind is one of `leaves`.
    Node { node: String, leaves: Vec<String> },
    Enum { name: String, values: Vec<String> },
    Value(Primitive),
    Maybe { inner: String },
    List { inner: String },
}

impl CodecPlan {
    pub fn build(schema: &Schema, any_node: &str) -> Self {
        let graph = schema.graph();

        let mut shapes: IndexSet<SemanticType> = IndexSet::new();
        for leaf in graph.leaves() {
            for attr in &schema.node(leaf).attributes {
                collect_shapes(&attr.ty, &mut shapes);
            }
        }

        let mut sorted: Vec<SemanticType> = shapes.into_iter().collect();
        sorted.sort_by_cached_key(|ty| (shape_name(ty), ty.clone()));

        let mut unique = UniqueNames::default();
        let names: HashMap<SemanticType, String> = sorted
            .iter()
            .map(|ty| (ty.clone(), unique.unique(&format!("decode{}", shape_name(ty)))))
            .collect();

        let decoders = sorted
            .iter()
            .map(|ty| Decoder {
                name: names[ty].clone(),
                shape: ty.clone(),
                body: match ty {
                    SemanticType::Node(name) => DecoderBody::Node {
                        node: name.clone(),
                        leaves: schema.leaves_of(name).to_vec(),
                    },
                    SemanticType::Enum(name) => DecoderBody::Enum {
                        name: name.clone(),
                        values: graph
                            .enum_decl(name)
                            .map(|e| e.values.clone())
                            .unwrap_or_default(),
                    },
                    SemanticType::Value(primitive) => DecoderBody::Value(*primitive),
                    SemanticType::Nullable(inner) => DecoderBody::Maybe {
                        inner: names[&**inner].clone(),
                    },
                    SemanticType::List(inner) => DecoderBody::List {
                        inner: names[&**inner].clone(),
                    },
                    other => crate::invariants::unreachable_shape(other),
                },
            })
            .collect();

        let leaves = graph
            .leaves()
            .into_iter()
            .map(|leaf| CodecLeaf {
                node: leaf.to_owned(),
                entries: schema
                    .node(leaf)
                    .attributes
                    .iter()
                    .map(|attr| CodecEntry {
                        attribute: attr.name.clone(),
                        ty: attr.ty.clone(),
                        decoder: names[&attr.ty].clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            any_node: any_node.to_owned(),
            leaves,
            decoders,
        }
    }

    pub fn decoder(&self, shape: &SemanticType) -> Option<&Decoder> {
        self.decoders.iter().find(|d| &d.shape == shape)
    }
}

fn collect_shapes(ty: &SemanticType, out: &mut IndexSet<SemanticType>) {
    if let SemanticType::Nullable(inner) | SemanticType::List(inner) = ty {
        collect_shapes(inner, out);
    }
    out.insert(ty.clone());
}
