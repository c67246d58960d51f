//! `ast.ts`: enums, node classes and interface unions.

use astgen_core::NodeKind;

use super::naming::{Scope, quote, sanitize, value_type};
use super::{Config, Emitter};
use crate::plan::{DataPlan, NodeEntry};

pub(super) fn render(data: &DataPlan, config: &Config) -> String {
    let mut e = Emitter::new(config);

    for decl in &data.enums {
        let body = if decl.values.is_empty() {
            "never".to_owned()
        } else {
            decl.values
                .iter()
                .map(|v| quote(v))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        e.line(format!("{}type {} = {body};", e.export(), decl.name));
        e.blank();
    }

    if data.node(&data.any_node).is_none() {
        let leaves: Vec<&str> = data.leaves().iter().map(|n| n.name.as_str()).collect();
        let body = if leaves.is_empty() {
            "never".to_owned()
        } else {
            leaves.join(" | ")
        };
        e.line(format!("{}type {} = {body};", e.export(), data.any_node));
        e.blank();
    }

    for node in &data.nodes {
        match node.kind {
            NodeKind::Leaf => leaf_class(&mut e, node),
            NodeKind::AbstractClass | NodeKind::Interface => {
                let body = if node.children.is_empty() {
                    "never".to_owned()
                } else {
                    node.children.join(" | ")
                };
                e.line(format!("{}type {} = {body};", e.export(), node.name));
            }
        }
        e.blank();
    }

    e.finish()
}

fn leaf_class(e: &mut Emitter<'_>, node: &NodeEntry) {
    if let Some(doc) = parents_doc(node) {
        e.line(doc);
    }
    e.open(format!("{}class {} {{", e.export(), node.name));
    e.line(format!("readonly type = {} as const;", quote(&node.name)));
    for field in &node.constructor {
        e.line(format!("{}: {};", field.name, value_type(&field.ty, Scope::Local)));
    }

    if !node.constructor.is_empty() {
        e.blank();
        let params = node
            .constructor
            .iter()
            .map(|f| format!("{}: {}", sanitize(&f.name), value_type(&f.ty, Scope::Local)))
            .collect::<Vec<_>>()
            .join(", ");
        e.open(format!("constructor({params}) {{"));
        for field in &node.constructor {
            e.line(format!("this.{} = {};", field.name, sanitize(&field.name)));
        }
        e.close("}");
    }
    e.close("}");
}

fn parents_doc(node: &NodeEntry) -> Option<String> {
    let implements = node
        .implements
        .iter()
        .map(|p| format!("`{p}`"))
        .collect::<Vec<_>>()
        .join(", ");
    match (&node.extends, implements.is_empty()) {
        (None, true) => None,
        (Some(parent), true) => Some(format!("/** Extends `{parent}`. */")),
        (None, false) => Some(format!("/** Implements {implements}. */")),
        (Some(parent), false) => Some(format!("/** Extends `{parent}`; implements {implements}. */")),
    }
}
