//! Test utilities: the shared fixture grammar and pipeline shortcuts.

use astgen_core::{Facts, NodeGraph, Schema};

use crate::resolve::{self, BuildContext};
use crate::{Config, Diagnostics, SourceMap, facts, order, parser, unions};

pub const MINI_GRAMMAR: &str = include_str!("../fixtures/mini.webidl");
pub const MINI_ORDER: &str = include_str!("../fixtures/mini.order");

/// How far to run the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Unions,
    Facts,
}

pub struct Run {
    pub graph: NodeGraph,
    pub facts: Facts,
    pub diagnostics: Diagnostics,
}

pub fn run(grammar: &str, order: &str, config: &Config, stage: Stage) -> Run {
    let mut sources = SourceMap::new();
    let grammar_id = sources.add_inline(grammar);
    let order_id = sources.add_inline(order);

    let parsed = parser::parse(grammar, grammar_id);
    let (table, order_diagnostics) = order::parse_order(order, order_id);

    let mut ctx = BuildContext::new(config, grammar_id, order_id);
    ctx.diagnostics.extend(parsed.diagnostics);
    ctx.diagnostics.extend(order_diagnostics);

    resolve::resolve(&mut ctx, &parsed.grammar, &table);
    if stage != Stage::Resolve && !ctx.has_errors() {
        unions::eliminate_unions(&mut ctx);
    }
    let facts = if stage == Stage::Facts && !ctx.has_errors() {
        facts::compute_facts(&mut ctx)
    } else {
        Facts::default()
    };

    let (graph, diagnostics) = ctx.finish();
    Run {
        graph,
        facts,
        diagnostics,
    }
}

/// Full analysis; panics with rendered diagnostics on any error.
pub fn schema(grammar: &str, order: &str) -> Schema {
    schema_with(grammar, order, &Config::default())
}

pub fn schema_with(grammar: &str, order: &str, config: &Config) -> Schema {
    let run = run(grammar, order, config, Stage::Facts);
    if run.diagnostics.has_errors() {
        panic!("expected a valid grammar:\n{}", run.diagnostics);
    }
    Schema::new(run.graph, run.facts)
}

pub fn mini_schema() -> Schema {
    schema(MINI_GRAMMAR, MINI_ORDER)
}

/// Diagnostics of a full run, one per line.
pub fn errors(grammar: &str, order: &str) -> String {
    run(grammar, order, &Config::default(), Stage::Facts)
        .diagnostics
        .to_string()
}

/// Graph rendering without derived facts.
pub fn render_graph(graph: NodeGraph) -> String {
    Schema::new(graph, Facts::default()).printer().render()
}
