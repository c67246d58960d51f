//! `Generator`: run every stage over a grammar and an order table.

use astgen_core::Schema;

use crate::plan::Plans;
use crate::resolve::{self, BuildContext};
use crate::typegen::typescript;
use crate::{Config, Diagnostics, Error, Result, SourceId, SourceMap};
use crate::{facts, invariants, order, parser, unions};

/// Frozen schema plus the warnings produced on the way.
#[derive(Debug)]
pub struct Analysis {
    pub schema: Schema,
    pub warnings: Diagnostics,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

#[derive(Debug)]
pub struct Output {
    pub files: Vec<GeneratedFile>,
    pub warnings: Diagnostics,
}

#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: Config,
    typescript: typescript::Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            typescript: typescript::Config::default(),
        }
    }

    pub fn typescript(mut self, config: typescript::Config) -> Self {
        self.typescript = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse, resolve, eliminate unions and compute derived facts.
    ///
    /// Stops after the first stage that reports an error; the error carries
    /// every diagnostic collected up to that point.
    pub fn analyze(&self, sources: &SourceMap, grammar: SourceId, order: SourceId) -> Result<Analysis> {
        let parsed = parser::parse(sources.content(grammar), grammar);
        let (table, order_diagnostics) = order::parse_order(sources.content(order), order);

        let grammar_failed = parsed.diagnostics.has_errors();
        let order_failed = order_diagnostics.has_errors();
        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(order_diagnostics);
        if grammar_failed {
            return Err(Error::GrammarParse(diagnostics));
        }
        if order_failed {
            return Err(Error::Order(diagnostics));
        }
        tracing::debug!(
            definitions = parsed.grammar.definitions.len(),
            sections = table.len(),
            "parsed inputs"
        );

        let mut ctx = BuildContext::new(&self.config, grammar, order);
        ctx.diagnostics = diagnostics;

        resolve::resolve(&mut ctx, &parsed.grammar, &table);
        if ctx.has_errors() {
            return Err(Error::Analysis(ctx.finish().1));
        }

        unions::eliminate_unions(&mut ctx);
        if ctx.has_errors() {
            return Err(Error::Analysis(ctx.finish().1));
        }
        invariants::ensure_no_unions(ctx.graph());

        let facts = facts::compute_facts(&mut ctx);
        let (graph, warnings) = ctx.finish();
        if warnings.has_errors() {
            return Err(Error::Analysis(warnings));
        }

        Ok(Analysis {
            schema: Schema::new(graph, facts),
            warnings,
        })
    }

    /// Analyze and render every output file. Nothing is returned on error.
    pub fn generate(&self, sources: &SourceMap, grammar: SourceId, order: SourceId) -> Result<Output> {
        let analysis = self.analyze(sources, grammar, order)?;
        let files = self.render(&analysis.schema);
        tracing::debug!(files = files.len(), "rendered output");
        Ok(Output {
            files,
            warnings: analysis.warnings,
        })
    }

    /// Render every output file for an analyzed schema.
    pub fn render(&self, schema: &Schema) -> Vec<GeneratedFile> {
        let plans = Plans::build(schema, &self.config);
        typescript::render_all(&plans, &self.typescript)
    }
}
