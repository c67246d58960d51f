//! Director plan: one dispatch method per reachable type shape.
//!
//! Methods are discovered from the root by following stateful attribute
//! types of leaves and children of non-leaves. The seen-set is keyed by
//! shape, so `List<Expression>` reached from two nodes is one method. Names
//! are derived afterwards; two shapes that would share a name get a numeric
//! suffix.

use std::collections::{HashMap, HashSet};

use astgen_core::{Schema, SemanticType};
use indexmap::IndexSet;

use super::naming::{UniqueNames, shape_name};
use crate::Config;

/// Name of the generic any-node entry point.
pub const ENTRY_METHOD: &str = "reduce";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectorPlan {
    /// Pass lazily evaluated children to the reducer.
    pub thunked: bool,
    pub any_node: String,
    /// Sorted by name.
    pub methods: Vec<DispatchMethod>,
    /// Generic entry: every reachable leaf and its method, sorted by leaf.
    pub entry: Vec<DispatchCase>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchMethod {
    pub name: String,
    pub shape: SemanticType,
    pub body: DispatchBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchBody {
    /// Test children in declaration order; the first whose leaves hold the
    /// node's kind handles it.
    Interface { cases: Vec<DispatchCase> },
    /// Reduce every stateful attribute, then call the reducer.
    Leaf { node: String, args: Vec<LeafArg> },
    Maybe { inner: String },
    List { inner: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchCase {
    pub child: String,
    /// Kinds routed to `child`; kinds claimed by an earlier child are absent.
    pub leaves: Vec<String>,
    pub method: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafArg {
    pub attribute: String,
    pub shape: SemanticType,
    pub method: String,
}

impl DirectorPlan {
    pub fn build(schema: &Schema, config: &Config, any_node: &str) -> Self {
        let shapes = reachable_shapes(schema, config);

        let mut sorted: Vec<&SemanticType> = shapes.iter().collect();
        sorted.sort_by_cached_key(|ty| (shape_name(ty), (*ty).clone()));

        let mut unique = UniqueNames::default();
        unique.reserve(ENTRY_METHOD);
        let names: HashMap<&SemanticType, String> = sorted
            .iter()
            .map(|ty| (*ty, unique.unique(&format!("reduce{}", shape_name(ty)))))
            .collect();
        let name_of = |ty: &SemanticType| names[ty].clone();

        let mut methods: Vec<DispatchMethod> = sorted
            .iter()
            .map(|&ty| DispatchMethod {
                name: name_of(ty),
                shape: ty.clone(),
                body: dispatch_body(schema, ty, &name_of),
            })
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        let mut entry: Vec<DispatchCase> = methods
            .iter()
            .filter_map(|m| match &m.body {
                DispatchBody::Leaf { node, .. } => Some(DispatchCase {
                    child: node.clone(),
                    leaves: vec![node.clone()],
                    method: m.name.clone(),
                }),
                _ => None,
            })
            .collect();
        entry.sort_by(|a, b| a.child.cmp(&b.child));

        Self {
            thunked: false,
            any_node: any_node.to_owned(),
            methods,
            entry,
        }
    }

    /// Same dispatch, with thunked children.
    pub fn to_thunked(&self) -> Self {
        Self {
            thunked: true,
            ..self.clone()
        }
    }

    pub fn method(&self, shape: &SemanticType) -> Option<&DispatchMethod> {
        self.methods.iter().find(|m| &m.shape == shape)
    }

    /// Leaves with a dispatch method, sorted.
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        self.entry.iter().map(|c| c.child.as_str())
    }
}

fn reachable_shapes(schema: &Schema, config: &Config) -> IndexSet<SemanticType> {
    let graph = schema.graph();
    let root = config.root_name();
    let seeds: Vec<SemanticType> = if graph.has_node(root) {
        vec![SemanticType::node(root)]
    } else {
        if config.root.is_some() {
            tracing::warn!(root, "root node not declared; seeding from every node");
        }
        graph.node_names().map(SemanticType::node).collect()
    };

    let mut seen = IndexSet::new();
    let mut stack: Vec<SemanticType> = seeds.into_iter().rev().collect();
    while let Some(ty) = stack.pop() {
        if seen.contains(&ty) {
            continue;
        }
        match &ty {
            SemanticType::Node(name) => {
                let decl = graph.ensure_node(name);
                if decl.is_leaf() {
                    for attr in decl.stateful_attributes() {
                        stack.push(attr.ty.clone());
                    }
                } else {
                    for child in &decl.children {
                        stack.push(SemanticType::node(child));
                    }
                }
            }
            SemanticType::Nullable(inner) | SemanticType::List(inner) => {
                stack.push((**inner).clone());
            }
            _ => {}
        }
        seen.insert(ty);
    }
    seen
}

fn dispatch_body(
    schema: &Schema,
    ty: &SemanticType,
    name_of: &impl Fn(&SemanticType) -> String,
) -> DispatchBody {
    match ty {
        SemanticType::Node(name) => {
            let decl = schema.node(name);
            if decl.is_leaf() {
                let args = decl
                    .stateful_attributes()
                    .map(|attr| LeafArg {
                        attribute: attr.name.clone(),
                        shape: attr.ty.clone(),
                        method: name_of(&attr.ty),
                    })
                    .collect();
                return DispatchBody::Leaf {
                    node: name.clone(),
                    args,
                };
            }

            let mut claimed: HashSet<&str> = HashSet::new();
            let cases = decl
                .children
                .iter()
                .filter_map(|child| {
                    let leaves: Vec<String> = schema
                        .leaves_of(child)
                        .iter()
                        .filter(|leaf| claimed.insert(leaf.as_str()))
                        .cloned()
                        .collect();
                    (!leaves.is_empty()).then(|| DispatchCase {
                        child: child.clone(),
                        leaves,
                        method: name_of(&SemanticType::node(child)),
                    })
                })
                .collect();
            DispatchBody::Interface { cases }
        }
        SemanticType::Nullable(inner) => DispatchBody::Maybe {
            inner: name_of(inner),
        },
        SemanticType::List(inner) => DispatchBody::List {
            inner: name_of(inner),
        },
        other => crate::invariants::unreachable_shape(other),
    }
}
