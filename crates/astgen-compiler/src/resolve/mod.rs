//! Type resolver: parse tree → node graph with resolved attribute types.
//!
//! Two passes. The first registers every interface, typedef and enum name
//! and links inheritance edges, so types may refer forward. The second
//! resolves attribute lists parents-first (memoized), drops the `type`
//! discriminator, and orders the result by the attribute-order table.
//!
//! Unions and typedef references survive this stage as `Union`/`Named`;
//! the union eliminator removes them.

mod context;
mod shape;


use std::collections::{HashMap, HashSet};

use astgen_core::idl::{Definition, EnumDef, Grammar, Ident, IdlType, Interface, Typedef};
use astgen_core::utils::suggest;
use astgen_core::{Attribute, EnumDecl, NodeDecl, NodeOrigin, Primitive, SemanticType};
use indexmap::IndexMap;

pub use context::BuildContext;
pub use shape::is_supported_shape;

use crate::diagnostics::DiagnosticKind;
use crate::order::OrderTable;

/// Name of the discriminator member; never becomes an attribute.
pub const DISCRIMINATOR: &str = "type";

const PRIMITIVE_NAMES: &[&str] = &["DOMString", "boolean", "double"];

/// Resolve `grammar` into `ctx.graph`, reporting into `ctx.diagnostics`.
pub fn resolve(ctx: &mut BuildContext<'_>, grammar: &Grammar, order: &OrderTable) {
    let mut resolver = Resolver::new(ctx, order);
    resolver.register(grammar);
    resolver.link(grammar);
    if resolver.report_inheritance_cycles() {
        return;
    }
    resolver.resolve_typedefs();
    resolver.report_typedef_cycles();

    let names: Vec<&str> = resolver.interfaces.keys().copied().collect();
    for name in names {
        resolver.resolve_attributes(name);
    }
    resolver.check_unused_sections();
    resolver.check_concrete_parents();

    tracing::debug!(
        nodes = resolver.ctx.graph.node_count(),
        enums = resolver.ctx.graph.enums().count(),
        typedefs = resolver.typedefs.len(),
        "resolved grammar"
    );
}

struct Resolver<'g, 'c, 'a> {
    ctx: &'c mut BuildContext<'a>,
    order: &'g OrderTable,
    interfaces: IndexMap<&'g str, &'g Interface>,
    typedefs: IndexMap<&'g str, &'g Typedef>,
    /// Nodes whose attribute list is final.
    resolved: HashSet<String>,
    /// Members (own or inherited) dropped because their type failed to resolve.
    unresolved: HashMap<String, HashSet<String>>,
}

impl<'g, 'c, 'a> Resolver<'g, 'c, 'a> {
    fn new(ctx: &'c mut BuildContext<'a>, order: &'g OrderTable) -> Self {
        Self {
            ctx,
            order,
            interfaces: IndexMap::new(),
            typedefs: IndexMap::new(),
            resolved: HashSet::new(),
            unresolved: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Pass 1: names and edges
    // ------------------------------------------------------------------------

    fn register(&mut self, grammar: &'g Grammar) {
        for def in &grammar.definitions {
            match def {
                Definition::Interface(interface) => {
                    if self.declare(&interface.name) {
                        self.ctx
                            .graph
                            .insert_node(NodeDecl::new(&interface.name.text, NodeOrigin::Declared));
                        self.interfaces.insert(&interface.name.text, interface);
                    }
                }
                Definition::Typedef(typedef) => {
                    if self.declare(&typedef.name) {
                        self.typedefs.insert(&typedef.name.text, typedef);
                    }
                }
                Definition::Enum(decl) => {
                    if self.declare(&decl.name) {
                        self.register_enum(decl);
                    }
                }
                Definition::Implements(_) => {}
            }
        }
    }

    /// Claim a name. Reports a redefinition and returns false when taken.
    fn declare(&mut self, name: &Ident) -> bool {
        let builtin = PRIMITIVE_NAMES.contains(&name.text.as_str());
        if let Some(&first) = self.ctx.spans.get(&name.text) {
            self.ctx
                .report(DiagnosticKind::Redefinition, name.range)
                .message(&name.text)
                .related_to("first defined here", first)
                .emit();
            return false;
        }
        if builtin {
            self.ctx
                .report(DiagnosticKind::Redefinition, name.range)
                .message(&name.text)
                .hint("built-in types cannot be redefined")
                .emit();
            return false;
        }
        self.ctx.spans.insert(name.text.clone(), name.range);
        true
    }

    fn register_enum(&mut self, decl: &EnumDef) {
        if !self.ctx.config.is_known_enum(&decl.name.text) {
            let hint = match suggest(
                &decl.name.text,
                self.ctx.config.known_enums.iter().map(String::as_str),
            ) {
                Some(name) => format!("did you mean `{name}`?"),
                None => format!(
                    "recognized enums: {}",
                    self.ctx.config.known_enums.join(", ")
                ),
            };
            self.ctx
                .report(DiagnosticKind::UnknownEnum, decl.name.range)
                .message(&decl.name.text)
                .hint(hint)
                .emit();
        }

        let mut values: Vec<&Ident> = Vec::new();
        for value in &decl.values {
            if let Some(first) = values.iter().find(|v| v.text == value.text) {
                let first = first.range;
                self.ctx
                    .report(DiagnosticKind::DuplicateEnumValue, value.range)
                    .message(&value.text)
                    .related_to("first listed here", first)
                    .emit();
                continue;
            }
            values.push(value);
        }

        self.ctx.graph.insert_enum(EnumDecl::new(
            &decl.name.text,
            values.into_iter().map(|v| v.text.clone()).collect(),
        ));
    }

    fn link(&mut self, grammar: &'g Grammar) {
        for def in &grammar.definitions {
            match def {
                Definition::Interface(interface) => {
                    if !self.interfaces.contains_key(interface.name.text.as_str()) {
                        continue;
                    }
                    if let Some(parent) = &interface.inheritance {
                        self.add_edge(&interface.name.text, parent);
                    }
                }
                Definition::Implements(implements) => {
                    if !self.ctx.graph.has_node(&implements.target.text) {
                        self.report_unknown(DiagnosticKind::UnknownType, &implements.target);
                        continue;
                    }
                    self.add_edge(&implements.target.text, &implements.implements);
                }
                Definition::Typedef(_) | Definition::Enum(_) => {}
            }
        }
    }

    fn add_edge(&mut self, child: &str, parent: &Ident) {
        if !self.ctx.graph.has_node(&parent.text) {
            self.report_unknown(DiagnosticKind::UnknownParent, parent);
            return;
        }
        self.ctx.graph.add_edge(child, &parent.text);
    }

    /// Returns whether any cycle was found.
    fn report_inheritance_cycles(&mut self) -> bool {
        let mut state: IndexMap<String, Visit> = IndexMap::new();
        let mut cycles: Vec<Vec<String>> = Vec::new();
        let names: Vec<String> = self.ctx.graph.node_names().map(str::to_owned).collect();
        for name in &names {
            let mut path = Vec::new();
            self.visit_parents(name, &mut state, &mut path, &mut cycles);
        }

        for cycle in &cycles {
            let Some(first) = cycle.first() else {
                continue;
            };
            let range = self.ctx.span_of(first);
            self.ctx
                .report(DiagnosticKind::InheritanceCycle, range)
                .message(cycle.join(" -> "))
                .emit();
        }
        !cycles.is_empty()
    }

    fn visit_parents(
        &self,
        name: &str,
        state: &mut IndexMap<String, Visit>,
        path: &mut Vec<String>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        match state.get(name) {
            Some(Visit::Done) => return,
            Some(Visit::InProgress) => {
                if let Some(start) = path.iter().position(|p| p == name) {
                    let mut cycle = path[start..].to_vec();
                    cycle.push(name.to_owned());
                    cycles.push(cycle);
                }
                return;
            }
            None => {}
        }
        state.insert(name.to_owned(), Visit::InProgress);
        path.push(name.to_owned());
        let parents = self.ctx.graph.ensure_node(name).parents.clone();
        for parent in &parents {
            self.visit_parents(parent, state, path, cycles);
        }
        path.pop();
        state.insert(name.to_owned(), Visit::Done);
    }

    fn resolve_typedefs(&mut self) {
        let typedefs: Vec<&'g Typedef> = self.typedefs.values().copied().collect();
        for typedef in typedefs {
            if let Some(ty) = self.resolve_type(&typedef.ty) {
                self.ctx.graph.insert_named_type(&typedef.name.text, ty);
            }
        }
    }

    fn report_typedef_cycles(&mut self) {
        let names: Vec<String> = self
            .ctx
            .graph
            .named_types()
            .map(|(name, _)| name.to_owned())
            .collect();
        for name in names {
            if self.typedef_reaches(&name, &name) {
                let range = self.ctx.span_of(&name);
                self.ctx
                    .report(DiagnosticKind::TypedefCycle, range)
                    .message(format!("`{name}`"))
                    .emit();
            }
        }
    }

    /// Whether expanding typedef `from` eventually mentions typedef `target`.
    fn typedef_reaches(&self, from: &str, target: &str) -> bool {
        let mut stack = vec![from.to_owned()];
        let mut seen: HashSet<String> = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(ty) = self.ctx.graph.named_type(&current) else {
                continue;
            };
            let mut refs = Vec::new();
            collect_named(ty, &mut refs);
            for r in refs {
                if r == target {
                    return true;
                }
                stack.push(r.to_owned());
            }
        }
        false
    }

    // ------------------------------------------------------------------------
    // Type expressions
    // ------------------------------------------------------------------------

    fn resolve_type(&mut self, ty: &IdlType) -> Option<SemanticType> {
        if !is_supported_shape(ty) {
            self.ctx
                .report(DiagnosticKind::UnsupportedTypeShape, ty.range())
                .message(format!("`{ty}`"))
                .hint("supported shapes are T, T?, T[], T?[], T[]? and T?[]?, where T is a name or a union of names")
                .emit();
            return None;
        }
        self.resolve_shape(ty)
    }

    fn resolve_shape(&mut self, ty: &IdlType) -> Option<SemanticType> {
        match ty {
            IdlType::Simple(ident) => self.resolve_name(ident),
            IdlType::Nullable(inner, _) => Some(SemanticType::nullable(self.resolve_shape(inner)?)),
            IdlType::Array(inner, _) => Some(SemanticType::list(self.resolve_shape(inner)?)),
            IdlType::Union(members, _) => {
                let mut resolved = Vec::with_capacity(members.len());
                let mut ok = true;
                for member in members {
                    let IdlType::Simple(ident) = member else {
                        self.ctx
                            .report(DiagnosticKind::UnionMemberNotSimple, member.range())
                            .message(format!("`{member}`"))
                            .emit();
                        ok = false;
                        continue;
                    };
                    match self.resolve_name(ident) {
                        Some(ty) => resolved.push(ty),
                        None => ok = false,
                    }
                }
                ok.then_some(SemanticType::Union(resolved))
            }
        }
    }

    /// Lookup priority: node, primitive, typedef, enum.
    fn resolve_name(&mut self, ident: &Ident) -> Option<SemanticType> {
        let name = ident.text.as_str();
        if self.ctx.graph.has_node(name) {
            return Some(SemanticType::node(name));
        }
        if let Some(primitive) = Primitive::from_idl(name) {
            return Some(SemanticType::Value(primitive));
        }
        if self.typedefs.contains_key(name) {
            return Some(SemanticType::Named(name.to_owned()));
        }
        if self.ctx.graph.has_enum(name) {
            return Some(SemanticType::Enum(name.to_owned()));
        }
        self.report_unknown(DiagnosticKind::UnknownType, ident);
        None
    }

    fn report_unknown(&mut self, kind: DiagnosticKind, ident: &Ident) {
        let candidates = self
            .ctx
            .spans
            .keys()
            .map(String::as_str)
            .chain(PRIMITIVE_NAMES.iter().copied());
        let hint = suggest(&ident.text, candidates).map(|s| format!("did you mean `{s}`?"));
        let builder = self.ctx.report(kind, ident.range).message(&ident.text);
        match hint {
            Some(hint) => builder.hint(hint).emit(),
            None => builder.emit(),
        }
    }

    // ------------------------------------------------------------------------
    // Pass 2: attributes
    // ------------------------------------------------------------------------

    fn resolve_attributes(&mut self, name: &str) {
        if !self.resolved.insert(name.to_owned()) {
            return;
        }

        let parents = self.ctx.graph.ensure_node(name).parents.clone();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut unresolved: HashSet<String> = HashSet::new();
        for parent in &parents {
            self.resolve_attributes(parent);
            if let Some(names) = self.unresolved.get(parent) {
                unresolved.extend(names.iter().cloned());
            }
            for attr in &self.ctx.graph.ensure_node(parent).attributes {
                if !attributes.iter().any(|a| a.name == attr.name) {
                    attributes.push(Attribute::new(&attr.name, attr.ty.clone(), true));
                }
            }
        }

        if let Some(interface) = self.interfaces.get(name).copied() {
            for member in &interface.members {
                if member.name.text == DISCRIMINATOR {
                    continue;
                }
                let Some(ty) = self.resolve_type(&member.ty) else {
                    unresolved.insert(member.name.text.clone());
                    continue;
                };
                self.ctx.attr_spans.insert(
                    (name.to_owned(), member.name.text.clone()),
                    member.ty.range(),
                );
                let own = Attribute::new(&member.name.text, ty, false);
                match attributes.iter_mut().find(|a| a.name == member.name.text) {
                    Some(existing) if !existing.inherited => {
                        self.ctx
                            .report(DiagnosticKind::Redefinition, member.name.range)
                            .message(format!("{name}.{}", member.name.text))
                            .emit();
                    }
                    Some(existing) => *existing = own,
                    None => attributes.push(own),
                }
            }
        }

        self.order_attributes(name, &mut attributes, &unresolved);
        if !unresolved.is_empty() {
            self.unresolved.insert(name.to_owned(), unresolved);
        }
        if let Some(decl) = self.ctx.graph.node_mut(name) {
            decl.attributes = attributes;
        }
    }

    /// Sort by the node's order section, reporting any mismatch.
    ///
    /// Entries naming an `unresolved` member were already reported as bad types.
    fn order_attributes(
        &mut self,
        name: &str,
        attributes: &mut [Attribute],
        unresolved: &HashSet<String>,
    ) {
        let Some(section) = self.order.section(name) else {
            if !attributes.is_empty() {
                let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
                let range = self.ctx.span_of(name);
                self.ctx
                    .report(DiagnosticKind::MissingAttributeOrder, range)
                    .message(name)
                    .hint(format!("add a `[{name}]` section listing: {}", names.join(", ")))
                    .emit();
            }
            return;
        };

        for attr in attributes.iter() {
            if section.position(&attr.name).is_none() {
                self.ctx
                    .report_order(DiagnosticKind::AttributeNotInOrder, section.header.range)
                    .message(format!("`{}` of `{name}`", attr.name))
                    .emit();
            }
        }
        for field in &section.fields {
            let known = attributes.iter().any(|a| a.name == field.text);
            if !known && !unresolved.contains(&field.text) {
                self.ctx
                    .report_order(DiagnosticKind::OrderNamesUnknownAttribute, field.range)
                    .message(format!("`{name}` has no attribute `{}`", field.text))
                    .emit();
            }
        }

        attributes.sort_by_key(|a| section.position(&a.name).unwrap_or(usize::MAX));
    }

    fn check_unused_sections(&mut self) {
        for section in self.order.sections() {
            let name = section.header.text.as_str();
            if self.ctx.graph.has_node(name) || self.typedefs.contains_key(name) {
                continue;
            }
            let candidates: Vec<&str> = self.interfaces.keys().copied().collect();
            let builder = self
                .ctx
                .report_order(DiagnosticKind::OrderForUnknownType, section.header.range)
                .message(format!("`{name}`"));
            match suggest(name, candidates) {
                Some(s) => builder.hint(format!("did you mean `{s}`?")).emit(),
                None => builder.emit(),
            }
        }
    }

    /// At most one attributed (class-like) parent per node.
    fn check_concrete_parents(&mut self) {
        let mut offenders: Vec<(String, Vec<String>)> = Vec::new();
        for decl in self.ctx.graph.nodes() {
            let class_like: Vec<String> = decl
                .parents
                .iter()
                .filter(|p| !self.ctx.graph.ensure_node(p).attributes.is_empty())
                .cloned()
                .collect();
            if class_like.len() > 1 {
                offenders.push((decl.name.clone(), class_like));
            }
        }

        for (name, parents) in offenders {
            let range = self.ctx.span_of(&name);
            let related: Vec<_> = parents
                .iter()
                .map(|p| (format!("`{p}` has attributes"), self.ctx.span_of(p)))
                .collect();
            let mut builder = self
                .ctx
                .report(DiagnosticKind::MultipleConcreteParents, range)
                .message(&name);
            for (message, parent_range) in related {
                builder = builder.related_to(message, parent_range);
            }
            builder.emit();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn collect_named<'t>(ty: &'t SemanticType, out: &mut Vec<&'t str>) {
    match ty {
        SemanticType::Named(name) => out.push(name),
        SemanticType::Nullable(inner) | SemanticType::List(inner) => collect_named(inner, out),
        SemanticType::Union(members) => members.iter().for_each(|m| collect_named(m, out)),
        SemanticType::Value(_) | SemanticType::Enum(_) | SemanticType::Node(_) => {}
    }
}
