//! Semantic types: the closed algebra every IDL type expression resolves to.

use serde::Serialize;

/// Built-in value types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Boolean,
    Double,
}

impl Primitive {
    /// Map an IDL primitive name (`DOMString`, `boolean`, `double`).
    pub fn from_idl(name: &str) -> Option<Self> {
        match name {
            "DOMString" => Some(Primitive::String),
            "boolean" => Some(Primitive::Boolean),
            "double" => Some(Primitive::Double),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Double => "double",
        }
    }
}

/// Resolved type of an attribute.
///
/// `Named` and `Union` only exist between resolution and union elimination;
/// the finalized graph holds neither.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "argument", rename_all = "camelCase")]
pub enum SemanticType {
    Value(Primitive),
    Enum(String),
    Node(String),
    Named(String),
    Nullable(Box<SemanticType>),
    List(Box<SemanticType>),
    Union(Vec<SemanticType>),
}

impl SemanticType {
    pub fn node(name: impl Into<String>) -> Self {
        SemanticType::Node(name.into())
    }

    pub fn nullable(inner: SemanticType) -> Self {
        SemanticType::Nullable(Box::new(inner))
    }

    pub fn list(inner: SemanticType) -> Self {
        SemanticType::List(Box::new(inner))
    }

    /// Whether traversal must thread a result for this type.
    ///
    /// Values and enums are passed through; nodes always need dispatch;
    /// wrappers inherit from their argument.
    ///
    /// # Panics
    /// On `Named`/`Union`, which cannot appear in a finalized graph.
    pub fn is_stateful(&self) -> bool {
        match self {
            SemanticType::Value(_) | SemanticType::Enum(_) => false,
            SemanticType::Nullable(inner) | SemanticType::List(inner) => inner.is_stateful(),
            SemanticType::Node(_) => true,
            SemanticType::Named(_) | SemanticType::Union(_) => {
                panic!("is_stateful: {self} must be eliminated before derived facts")
            }
        }
    }

    /// Innermost node name under any number of wrappers.
    pub fn innermost_node(&self) -> Option<&str> {
        match self {
            SemanticType::Node(name) => Some(name),
            SemanticType::Nullable(inner) | SemanticType::List(inner) => inner.innermost_node(),
            _ => None,
        }
    }

    /// Type with all `Nullable`/`List` wrappers removed.
    pub fn innermost(&self) -> &SemanticType {
        match self {
            SemanticType::Nullable(inner) | SemanticType::List(inner) => inner.innermost(),
            other => other,
        }
    }

    /// True for `Union` or `Named` anywhere in the type.
    pub fn has_unresolved(&self) -> bool {
        match self {
            SemanticType::Named(_) | SemanticType::Union(_) => true,
            SemanticType::Nullable(inner) | SemanticType::List(inner) => inner.has_unresolved(),
            _ => false,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, SemanticType::List(_))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, SemanticType::Nullable(_))
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Value(p) => write!(f, "{}", p.as_str()),
            SemanticType::Enum(name) | SemanticType::Node(name) | SemanticType::Named(name) => {
                write!(f, "{name}")
            }
            SemanticType::Nullable(inner) => write!(f, "Maybe<{inner}>"),
            SemanticType::List(inner) => write!(f, "List<{inner}>"),
            SemanticType::Union(members) => {
                write!(f, "(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, ")")
            }
        }
    }
}
