//! Union elimination.
//!
//! Rewrites every `Union` and `Named` left by the resolver into plain node
//! references. A typedef whose body is a union becomes a node named after the
//! typedef; an anonymous union becomes a synthetic node named by
//! concatenating its members. Either way the members gain the new node as a
//! parent, so `leaves(U)` is exactly the union of the members' leaf sets.
//!
//! Unions are keyed by their ordered member list: writing the same union
//! twice yields one node, and running the pass on its own output is a no-op.


use std::collections::HashMap;

use astgen_core::{NodeDecl, NodeGraph, NodeOrigin, SemanticType, TextRange};

use crate::diagnostics::DiagnosticKind;
use crate::resolve::BuildContext;

/// Eliminate unions and typedef references in `ctx.graph`.
pub fn eliminate_unions(ctx: &mut BuildContext<'_>) {
    let mut eliminator = UnionEliminator::new(ctx);
    eliminator.lower_typedefs();
    eliminator.lower_attributes();
    eliminator.rewrite_named_types();
    tracing::debug!(synthetic = eliminator.created, "eliminated unions");
}

/// A type left over after elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Residual {
    pub node: String,
    pub attribute: String,
    pub ty: SemanticType,
}

impl std::fmt::Display for Residual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.node, self.attribute, self.ty)
    }
}

/// Check that no attribute type still mentions a union or a typedef.
pub fn verify_no_unions(graph: &NodeGraph) -> Result<(), Residual> {
    match graph
        .attribute_types()
        .find(|(_, attr)| attr.ty.has_unresolved())
    {
        Some((decl, attr)) => Err(Residual {
            node: decl.name.clone(),
            attribute: attr.name.clone(),
            ty: attr.ty.clone(),
        }),
        None => Ok(()),
    }
}

struct UnionEliminator<'c, 'a> {
    ctx: &'c mut BuildContext<'a>,
    /// Ordered member list → node standing for that union.
    keys: HashMap<Vec<String>, String>,
    /// Typedef name → lowered type; `None` when lowering failed.
    lowered: HashMap<String, Option<SemanticType>>,
    expanding: Vec<String>,
    /// Suppresses reports while lowering copies of inherited attributes.
    quiet: bool,
    created: usize,
}

impl<'c, 'a> UnionEliminator<'c, 'a> {
    fn new(ctx: &'c mut BuildContext<'a>) -> Self {
        let keys = ctx
            .graph
            .nodes()
            .filter_map(|n| Some((n.origin.members()?.to_vec(), n.name.clone())))
            .collect();
        Self {
            ctx,
            keys,
            lowered: HashMap::new(),
            expanding: Vec::new(),
            quiet: false,
            created: 0,
        }
    }

    fn lower_typedefs(&mut self) {
        let names: Vec<String> = self
            .ctx
            .graph
            .named_types()
            .map(|(name, _)| name.to_owned())
            .collect();
        for name in names {
            self.lower_named(&name);
        }
    }

    fn lower_named(&mut self, name: &str) -> Option<SemanticType> {
        if let Some(done) = self.lowered.get(name) {
            return done.clone();
        }
        // Cycles were reported by the resolver.
        if self.expanding.iter().any(|n| n == name) {
            return None;
        }
        let ty = self.ctx.graph.named_type(name)?.clone();

        self.expanding.push(name.to_owned());
        let range = self.ctx.span_of(name);
        let result = match &ty {
            SemanticType::Union(members) => self.typedef_node(name, members, range),
            other => self.lower_type(other, range),
        };
        self.expanding.pop();

        self.lowered.insert(name.to_owned(), result.clone());
        result
    }

    fn typedef_node(
        &mut self,
        name: &str,
        members: &[SemanticType],
        range: TextRange,
    ) -> Option<SemanticType> {
        let members = self.member_names(members, range)?;
        let origin = NodeOrigin::Typedef {
            members: members.clone(),
        };

        match self.ctx.graph.node(name) {
            Some(existing) if existing.origin == origin => {}
            Some(_) => {
                self.ctx
                    .report(DiagnosticKind::Redefinition, range)
                    .message(name)
                    .emit();
                return None;
            }
            None => {
                self.ctx.graph.insert_node(NodeDecl::new(name, origin));
                self.created += 1;
            }
        }
        for member in &members {
            self.ctx.graph.add_edge(member, name);
        }
        self.keys.entry(members).or_insert_with(|| name.to_owned());
        Some(SemanticType::node(name))
    }

    fn lower_type(&mut self, ty: &SemanticType, range: TextRange) -> Option<SemanticType> {
        match ty {
            SemanticType::Value(_) | SemanticType::Enum(_) | SemanticType::Node(_) => {
                Some(ty.clone())
            }
            SemanticType::Named(name) => self.lower_named(name),
            SemanticType::Nullable(inner) => {
                Some(SemanticType::nullable(self.lower_type(inner, range)?))
            }
            SemanticType::List(inner) => Some(SemanticType::list(self.lower_type(inner, range)?)),
            SemanticType::Union(members) => {
                let members = self.member_names(members, range)?;
                Some(SemanticType::node(self.synthetic(members)))
            }
        }
    }

    /// Node names of union members, deduplicated in order.
    fn member_names(&mut self, members: &[SemanticType], range: TextRange) -> Option<Vec<String>> {
        let mut names: Vec<String> = Vec::with_capacity(members.len());
        let mut ok = true;
        for member in members {
            let lowered = match member {
                SemanticType::Named(name) => self.lower_named(name),
                other => Some(other.clone()),
            };
            match lowered {
                Some(SemanticType::Node(name)) => {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                Some(other) => {
                    if !self.quiet {
                        let detail = if *member == other {
                            format!("`{member}`")
                        } else {
                            format!("`{member}` resolves to `{other}`")
                        };
                        self.ctx
                            .report(DiagnosticKind::UnionMemberNotNode, range)
                            .message(detail)
                            .emit();
                    }
                    ok = false;
                }
                None => ok = false,
            }
        }
        ok.then_some(names)
    }

    /// Node for an anonymous union, created on first use.
    fn synthetic(&mut self, members: Vec<String>) -> String {
        if let [single] = members.as_slice() {
            return single.clone();
        }
        if let Some(existing) = self.keys.get(&members) {
            return existing.clone();
        }

        let base: String = members.concat();
        let mut name = base.clone();
        let mut suffix = 2;
        while self.is_taken(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }

        tracing::trace!(name = %name, members = ?members, "synthesized union node");
        self.ctx.graph.insert_node(NodeDecl::new(
            &name,
            NodeOrigin::Synthetic {
                members: members.clone(),
            },
        ));
        for member in &members {
            self.ctx.graph.add_edge(member, &name);
        }
        self.keys.insert(members, name.clone());
        self.created += 1;
        name
    }

    fn is_taken(&self, name: &str) -> bool {
        self.ctx.graph.has_node(name)
            || self.ctx.graph.has_enum(name)
            || self.ctx.graph.has_named_type(name)
            || self.ctx.spans.contains_key(name)
    }

    fn lower_attributes(&mut self) {
        let names: Vec<String> = self.ctx.graph.node_names().map(str::to_owned).collect();
        for node in names {
            let attributes = self.ctx.graph.ensure_node(&node).attributes.clone();
            for (index, attr) in attributes.iter().enumerate() {
                if !attr.ty.has_unresolved() {
                    continue;
                }
                let range = self
                    .ctx
                    .attr_span(&node, &attr.name)
                    .unwrap_or_else(|| self.ctx.span_of(&node));
                self.quiet = attr.inherited;
                let lowered = self.lower_type(&attr.ty, range);
                self.quiet = false;

                let Some(lowered) = lowered else {
                    continue;
                };
                if !attr.inherited && !is_final_shape(&lowered) {
                    self.ctx
                        .report(DiagnosticKind::UnsupportedTypeShape, range)
                        .message(format!("`{}` expands to `{lowered}`", attr.ty))
                        .emit();
                }
                if let Some(decl) = self.ctx.graph.node_mut(&node) {
                    decl.attributes[index].ty = lowered;
                }
            }
        }
    }

    fn rewrite_named_types(&mut self) {
        for (name, ty) in &self.lowered {
            if let Some(ty) = ty {
                self.ctx.graph.insert_named_type(name, ty.clone());
            }
        }
    }
}

/// `T`, `T?`, `T[]`, `T?[]`, `T[]?` or `T?[]?` over a node, value or enum.
fn is_final_shape(ty: &SemanticType) -> bool {
    fn strip_nullable(ty: &SemanticType) -> &SemanticType {
        match ty {
            SemanticType::Nullable(inner) => inner,
            other => other,
        }
    }
    let ty = strip_nullable(ty);
    let ty = match ty {
        SemanticType::List(inner) => strip_nullable(inner),
        other => other,
    };
    matches!(
        ty,
        SemanticType::Node(_) | SemanticType::Value(_) | SemanticType::Enum(_)
    )
}
