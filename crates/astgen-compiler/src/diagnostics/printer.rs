//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use astgen_core::TextRange;

use super::Diagnostics;
use super::message::Severity;
use crate::SourceMap;

/// Builder for rendering diagnostics against their sources.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: &'s SourceMap,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics, sources: &'s SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let source = self.sources.content(diag.source);
            let range = adjust_range(diag.range, source.len());

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .path(self.sources.kind(diag.source).display_name())
                .annotation(AnnotationKind::Primary.span(range).label(&diag.message));

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.range, source.len()))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity());
            let mut group = level.primary_title(&diag.message).element(snippet);
            for hint in &diag.hints {
                group = group.element(Level::HELP.message(hint));
            }
            let report: Vec<Group> = vec![group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Empty ranges are widened to one character so the caret stays visible.
fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start = range.start as usize;
    let end = range.end as usize;

    if start == end {
        return start.min(limit)..(start + 1).min(limit);
    }

    start..end
}
