//! Attribute-order table reader.
//!
//! ```text
//! [BinaryExpression]
//! left
//! operator
//! right
//! ```
//!
//! Each `[Type]` header starts a section; every following non-blank line
//! names one attribute. The table is the authoritative field order for every
//! emitter; consistency against the graph is checked by the resolver.

use astgen_core::TextRange;
use astgen_core::idl::Ident;
use indexmap::IndexMap;

use crate::SourceId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSection {
    pub header: Ident,
    pub fields: Vec<Ident>,
}

impl OrderSection {
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.text == field)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderTable {
    sections: IndexMap<String, OrderSection>,
}

impl OrderTable {
    pub fn section(&self, type_name: &str) -> Option<&OrderSection> {
        self.sections.get(type_name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &OrderSection> {
        self.sections.values()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse an order table. Malformed lines are reported and skipped.
pub fn parse_order(source: &str, source_id: SourceId) -> (OrderTable, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut table = OrderTable::default();
    let mut current: Option<usize> = None;
    // Fields under a rejected header are dropped without further reports.
    let mut skipping = false;

    let mut offset = 0usize;
    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let start = line_start + (line.len() - line.trim_start().len());
        let range = TextRange::from(start..start + trimmed.len());

        if let Some(rest) = trimmed.strip_prefix('[') {
            let Some(inner) = rest.strip_suffix(']') else {
                diagnostics
                    .report(source_id, DiagnosticKind::ExpectedToken, range)
                    .message("`]` to close the section header")
                    .emit();
                current = None;
                skipping = true;
                continue;
            };
            let name = inner.trim();
            if name.is_empty() {
                diagnostics
                    .report(source_id, DiagnosticKind::OrderEmptySection, range)
                    .emit();
                current = None;
                skipping = true;
                continue;
            }
            let name_start = start + 1 + (inner.len() - inner.trim_start().len());
            let header = Ident::new(name, TextRange::from(name_start..name_start + name.len()));

            if let Some(existing) = table.sections.get(name) {
                diagnostics
                    .report(source_id, DiagnosticKind::OrderDuplicateSection, header.range)
                    .message(format!("`{name}`"))
                    .related_to("first defined here", existing.header.range)
                    .emit();
                current = None;
                skipping = true;
                continue;
            }

            let (index, _) = table.sections.insert_full(
                name.to_owned(),
                OrderSection {
                    header,
                    fields: Vec::new(),
                },
            );
            current = Some(index);
            skipping = false;
            continue;
        }

        let Some((section_name, section)) = current.and_then(|i| table.sections.get_index_mut(i))
        else {
            if !skipping {
                diagnostics
                    .report(source_id, DiagnosticKind::OrderFieldOutsideSection, range)
                    .emit();
            }
            continue;
        };

        if let Some(first) = section.fields.iter().find(|f| f.text == trimmed) {
            diagnostics
                .report(source_id, DiagnosticKind::OrderDuplicateField, range)
                .message(format!("`{trimmed}` in `[{section_name}]`"))
                .related_to("first listed here", first.range)
                .emit();
            continue;
        }
        section.fields.push(Ident::new(trimmed, range));
    }

    (table, diagnostics)
}
