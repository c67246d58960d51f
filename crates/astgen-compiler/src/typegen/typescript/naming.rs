//! TypeScript spellings of types and identifiers.

use std::borrow::Cow;

use astgen_core::{Primitive, SemanticType};

use crate::invariants::unreachable_shape;

/// Words that cannot name a parameter or local binding.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Parameter-safe identifier: `super` becomes `_super`.
pub(super) fn sanitize(name: &str) -> Cow<'_, str> {
    if RESERVED.contains(&name) {
        Cow::Owned(format!("_{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Where a type is spelled: inside `ast.ts`, or behind the `AST` namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Scope {
    Local,
    Qualified,
}

impl Scope {
    pub(super) fn name(self, name: &str) -> String {
        match self {
            Scope::Local => name.to_owned(),
            Scope::Qualified => format!("AST.{name}"),
        }
    }
}

/// Type of a stored attribute value.
pub(super) fn value_type(ty: &SemanticType, scope: Scope) -> String {
    match ty {
        SemanticType::Value(primitive) => primitive_type(*primitive).to_owned(),
        SemanticType::Enum(name) | SemanticType::Node(name) => scope.name(name),
        SemanticType::Nullable(inner) => format!("{} | null", value_type(inner, scope)),
        SemanticType::List(inner) => format!("Array<{}>", value_type(inner, scope)),
        other => unreachable_shape(other),
    }
}

/// Type of a reduced attribute: every node position becomes `state`.
pub(super) fn result_type(ty: &SemanticType, state: &str) -> String {
    match ty {
        SemanticType::Node(_) => state.to_owned(),
        SemanticType::Nullable(inner) => format!("{} | null", result_type(inner, state)),
        SemanticType::List(inner) => format!("Array<{}>", result_type(inner, state)),
        other => unreachable_shape(other),
    }
}

pub(super) fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "string",
        Primitive::Boolean => "boolean",
        Primitive::Double => "number",
    }
}

/// JavaScript string literal.
pub(super) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
