//! Human-readable rendering of a finalized schema.

use std::fmt::Write;

use crate::{Colors, NodeDecl, NodeKind, NodeOrigin, Schema};

/// Builder for rendering a schema as text.
pub struct SchemaPrinter<'s> {
    schema: &'s Schema,
    colors: Colors,
    facts: bool,
}

impl<'s> SchemaPrinter<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            colors: Colors::OFF,
            facts: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    /// Also print leaf sets and max-super per node.
    pub fn facts(mut self, value: bool) -> Self {
        self.facts = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        let graph = self.schema.graph();

        for decl in graph.enums() {
            write!(w, "{}enum{} {}{}{}", c.yellow, c.reset, c.blue, decl.name, c.reset)?;
            for value in &decl.values {
                write!(w, " {}\"{}\"{}", c.green, value, c.reset)?;
            }
            writeln!(w)?;
        }

        for decl in graph.nodes() {
            self.format_node(w, decl)?;
        }
        Ok(())
    }

    fn format_node(&self, w: &mut impl Write, decl: &NodeDecl) -> std::fmt::Result {
        let c = self.colors;
        let keyword = match decl.kind() {
            NodeKind::Leaf => "leaf",
            NodeKind::AbstractClass => "abstract",
            NodeKind::Interface => "interface",
        };
        write!(w, "{}{}{} {}{}{}", c.yellow, keyword, c.reset, c.blue, decl.name, c.reset)?;
        if !decl.parents.is_empty() {
            write!(w, " {}:{} {}", c.dim, c.reset, decl.parents.join(", "))?;
        }
        match &decl.origin {
            NodeOrigin::Declared => {}
            NodeOrigin::Typedef { members } => {
                write!(w, " {}= typedef ({}){}", c.dim, members.join(" or "), c.reset)?;
            }
            NodeOrigin::Synthetic { members } => {
                write!(w, " {}= ({}){}", c.dim, members.join(" or "), c.reset)?;
            }
        }
        writeln!(w)?;

        for attr in &decl.attributes {
            if attr.inherited {
                writeln!(w, "  {}{}: {} (inherited){}", c.dim, attr.name, attr.ty, c.reset)?;
            } else {
                writeln!(w, "  {}: {}", attr.name, attr.ty)?;
            }
        }

        if !decl.is_leaf() {
            writeln!(w, "  {}>{} {}", c.dim, c.reset, decl.children.join(", "))?;
        }

        if self.facts {
            if decl.is_leaf() {
                writeln!(
                    w,
                    "  {}max-super{} {}",
                    c.dim,
                    c.reset,
                    self.schema.max_super(&decl.name)
                )?;
            } else {
                writeln!(
                    w,
                    "  {}leaves{} {}",
                    c.dim,
                    c.reset,
                    self.schema.leaves_of(&decl.name).join(", ")
                )?;
            }
        }
        Ok(())
    }
}

impl Schema {
    pub fn printer(&self) -> SchemaPrinter<'_> {
        SchemaPrinter::new(self)
    }
}
