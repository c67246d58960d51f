//! Derived facts over the union-free graph: leaf sets and max-super.
//!
//! `isLeaf` and `isStateful` are cheap enough to answer on demand
//! (`NodeDecl::is_leaf`, `SemanticType::is_stateful`); only the two
//! whole-graph facts are precomputed here.

#[cfg(test)]
mod facts_tests;

use std::cmp::Reverse;
use std::collections::BTreeSet;

use astgen_core::{Facts, NodeGraph};
use indexmap::{IndexMap, IndexSet};

use crate::Config;
use crate::diagnostics::DiagnosticKind;
use crate::resolve::BuildContext;

/// Compute leaf sets for every node and max-super for every leaf.
pub fn compute_facts(ctx: &mut BuildContext<'_>) -> Facts {
    let graph = &ctx.graph;
    let leaves: IndexMap<String, BTreeSet<String>> = graph
        .node_names()
        .map(|name| (name.to_owned(), graph.leaves_of(name)))
        .collect();

    let slots = slot_types(graph);
    let mut max_super = IndexMap::new();
    let mut ambiguous: Vec<(String, Vec<String>)> = Vec::new();

    for leaf in graph.leaves() {
        let choice = MaxSuper::new(graph, ctx.config, &leaves, &slots).choose(leaf);
        if choice.ambiguous.len() > 1 {
            ambiguous.push((leaf.to_owned(), choice.ambiguous));
        }
        max_super.insert(leaf.to_owned(), choice.winner);
    }

    for (leaf, candidates) in ambiguous {
        let range = ctx.span_of(&leaf);
        let picked = &max_super[&leaf];
        ctx.report(DiagnosticKind::AmbiguousMaxSuper, range)
            .message(format!(
                "`{leaf}` could widen to any of {}; picked `{picked}`",
                candidates
                    .iter()
                    .map(|c| format!("`{c}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
            .hint("list the intended type in the category table")
            .emit();
    }

    tracing::debug!(
        leaves = max_super.len(),
        slots = slots.len(),
        "computed derived facts"
    );

    Facts {
        leaves: leaves
            .into_iter()
            .map(|(name, set)| (name, set.into_iter().collect()))
            .collect(),
        max_super,
    }
}

/// Distinct node types that appear (under any wrappers) as attribute types.
fn slot_types(graph: &NodeGraph) -> IndexSet<String> {
    graph
        .attribute_types()
        .filter_map(|(_, attr)| attr.ty.innermost_node())
        .map(str::to_owned)
        .collect()
}

struct MaxSuper<'g> {
    graph: &'g NodeGraph,
    config: &'g Config,
    leaves: &'g IndexMap<String, BTreeSet<String>>,
    slots: &'g IndexSet<String>,
}

struct Choice {
    winner: String,
    /// Tied candidates when the tie was broken by neither the category
    /// table nor the leaf itself.
    ambiguous: Vec<String>,
}

impl<'g> MaxSuper<'g> {
    fn new(
        graph: &'g NodeGraph,
        config: &'g Config,
        leaves: &'g IndexMap<String, BTreeSet<String>>,
        slots: &'g IndexSet<String>,
    ) -> Self {
        Self {
            graph,
            config,
            leaves,
            slots,
        }
    }

    fn leaves_of(&self, name: &str) -> &'g BTreeSet<String> {
        &self.leaves[name]
    }

    /// Leaves every slot that accepts `leaf` also accepts.
    fn admissible(&self, leaf: &str) -> BTreeSet<String> {
        let mut sets = self
            .slots
            .iter()
            .map(|slot| self.leaves_of(slot))
            .filter(|set| set.contains(leaf));
        let Some(first) = sets.next() else {
            return BTreeSet::from([leaf.to_owned()]);
        };
        sets.fold(first.clone(), |acc, set| {
            acc.intersection(set).cloned().collect()
        })
    }

    fn choose(&self, leaf: &str) -> Choice {
        let admissible = self.admissible(leaf);
        let mut candidates: Vec<&str> = self
            .graph
            .node_names()
            .filter(|name| {
                let set = self.leaves_of(name);
                set.contains(leaf) && set.is_subset(&admissible)
            })
            .collect();

        // An equal-sized candidate widens nothing, so the leaf keeps its own kind.
        candidates.sort_by_key(|name| {
            let decl = self.graph.ensure_node(name);
            (
                Reverse(self.leaves_of(name).len()),
                *name != leaf,
                self.config.category_position(name).unwrap_or(usize::MAX),
                decl.origin.rank(),
                *name,
            )
        });

        let Some(&winner) = candidates.first() else {
            return Choice {
                winner: leaf.to_owned(),
                ambiguous: Vec::new(),
            };
        };

        let top = self.leaves_of(winner).len();
        let decided = self.config.category_position(winner).is_some() || winner == leaf;
        let ambiguous = if decided {
            Vec::new()
        } else {
            candidates
                .iter()
                .filter(|name| self.leaves_of(name).len() == top)
                .map(|name| name.to_string())
                .collect()
        };

        Choice {
            winner: winner.to_owned(),
            ambiguous,
        }
    }
}
