//! Mutable state shared by resolution, union elimination and derived facts.

use std::collections::HashMap;

use astgen_core::{NodeGraph, TextRange};
use indexmap::IndexMap;

use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};
use crate::{Config, SourceId};

/// Graph under construction plus everything needed to report against it.
///
/// Lives from the first resolver pass until derived facts are computed;
/// `finish` hands out the graph and the diagnostics, and the spans go away
/// with it.
pub struct BuildContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) grammar_source: SourceId,
    pub(crate) order_source: SourceId,
    pub(crate) graph: NodeGraph,
    pub(crate) diagnostics: Diagnostics,
    /// Declared name (interface, typedef, enum) → span of the name.
    pub(crate) spans: IndexMap<String, TextRange>,
    /// `(node, attribute)` → span of the declared type, for own attributes.
    pub(crate) attr_spans: HashMap<(String, String), TextRange>,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a Config, grammar_source: SourceId, order_source: SourceId) -> Self {
        Self {
            config,
            grammar_source,
            order_source,
            graph: NodeGraph::new(),
            diagnostics: Diagnostics::new(),
            spans: IndexMap::new(),
            attr_spans: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn finish(self) -> (NodeGraph, Diagnostics) {
        (self.graph, self.diagnostics)
    }

    /// Span of a declared name; empty for synthesized nodes.
    pub(crate) fn span_of(&self, name: &str) -> TextRange {
        self.spans.get(name).copied().unwrap_or_default()
    }

    pub(crate) fn attr_span(&self, node: &str, attribute: &str) -> Option<TextRange> {
        self.attr_spans
            .get(&(node.to_owned(), attribute.to_owned()))
            .copied()
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(self.grammar_source, kind, range)
    }

    pub(crate) fn report_order(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(self.order_source, kind, range)
    }
}
