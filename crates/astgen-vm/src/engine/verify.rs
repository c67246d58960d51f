//! Type verification of trees against a schema.
//!
//! Walks the value alongside its declared type and collects every mismatch
//! with the path that leads to it (`statements[0].expression`).

use std::fmt;

use astgen_core::{Primitive, Schema, SemanticType};

use super::{AstNode, Value};

/// Every mismatch found in one tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyError {
    pub mismatches: Vec<String>,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree does not match the schema")?;
        for mismatch in &self.mismatches {
            write!(f, "\n  {mismatch}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VerifyError {}

/// Check that `value` is well-typed as `ty`: node kinds are leaves assignable
/// to their slot, every attribute is present and nothing else is.
pub fn verify(schema: &Schema, ty: &SemanticType, value: &Value) -> Result<(), VerifyError> {
    let mut errors = Vec::new();
    verify_type(schema, ty, value, &mut String::new(), &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(VerifyError { mismatches: errors })
    }
}

fn verify_type(
    schema: &Schema,
    ty: &SemanticType,
    value: &Value,
    path: &mut String,
    errors: &mut Vec<String>,
) {
    match (ty, value) {
        (SemanticType::Value(Primitive::String), Value::String(_))
        | (SemanticType::Value(Primitive::Boolean), Value::Boolean(_))
        | (SemanticType::Value(Primitive::Double), Value::Double(_)) => {}
        (SemanticType::Enum(name), Value::Enum(token)) => {
            let known = schema
                .graph()
                .enum_decl(name)
                .is_some_and(|decl| decl.index_of(token).is_some());
            if !known {
                errors.push(format_error(
                    path,
                    &format!("`{token}` is not a `{name}` token"),
                ));
            }
        }
        (SemanticType::Node(name), Value::Node(node)) => verify_node(schema, name, node, path, errors),
        (SemanticType::Nullable(_), Value::Null) => {}
        (SemanticType::Nullable(inner), _) => verify_type(schema, inner, value, path, errors),
        (SemanticType::List(inner), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                let prev_len = path.len();
                path.push_str(&format!("[{i}]"));
                verify_type(schema, inner, item, path, errors);
                path.truncate(prev_len);
            }
        }
        _ => errors.push(format_error(
            path,
            &format!("type: {ty}, value: {}", value.kind_name()),
        )),
    }
}

fn verify_node(
    schema: &Schema,
    slot: &str,
    node: &AstNode,
    path: &mut String,
    errors: &mut Vec<String>,
) {
    let Some(decl) = schema.graph().node(&node.kind) else {
        errors.push(format_error(path, &format!("unknown node kind `{}`", node.kind)));
        return;
    };
    if !decl.is_leaf() {
        errors.push(format_error(
            path,
            &format!("`{}` is not a concrete kind", node.kind),
        ));
        return;
    }
    if !schema.is_assignable(&node.kind, slot) {
        errors.push(format_error(
            path,
            &format!("`{}` does not fit `{slot}`", node.kind),
        ));
        return;
    }

    for attr in &decl.attributes {
        let prev_len = path.len();
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&attr.name);
        match node.field(&attr.name) {
            Some(value) => verify_type(schema, &attr.ty, value, path, errors),
            None => errors.push(format_error(path, "missing field")),
        }
        path.truncate(prev_len);
    }

    for (name, _) in &node.fields {
        if decl.attribute(name).is_none() {
            errors.push(format_error(
                path,
                &format!("`{}` has no attribute `{name}`", node.kind),
            ));
        }
    }
}

fn format_error(path: &str, message: &str) -> String {
    if path.is_empty() {
        message.to_owned()
    } else {
        format!("{path}: {message}")
    }
}
