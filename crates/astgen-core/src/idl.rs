//! Parse tree for the interface-description grammar.
//!
//! The shape is fixed: the parser produces it, the resolver consumes it.
//! Nothing here is resolved; names are plain strings with the span they
//! were written at.

use crate::TextRange;

/// A name together with where it was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub text: String,
    pub range: TextRange,
}

impl Ident {
    pub fn new(text: impl Into<String>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A whole grammar file: definitions in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grammar {
    pub definitions: Vec<Definition>,
}

impl Grammar {
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Interface(i) => Some(i),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Interface(Interface),
    Implements(Implements),
    Typedef(Typedef),
    Enum(EnumDef),
}

impl Definition {
    /// Span of the defining name (or the target for `implements`).
    pub fn name_range(&self) -> TextRange {
        match self {
            Definition::Interface(i) => i.name.range,
            Definition::Implements(i) => i.target.range,
            Definition::Typedef(t) => t.name.range,
            Definition::Enum(e) => e.name.range,
        }
    }
}

/// `interface Name : Parent { attribute Type field; ... };`
#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    pub name: Ident,
    pub inheritance: Option<Ident>,
    pub members: Vec<Member>,
}

/// `attribute Type name;`
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: Ident,
    pub ty: IdlType,
}

/// `Target implements Iface;`
#[derive(Clone, Debug, PartialEq)]
pub struct Implements {
    pub target: Ident,
    pub implements: Ident,
}

/// `typedef Type Name;`
#[derive(Clone, Debug, PartialEq)]
pub struct Typedef {
    pub name: Ident,
    pub ty: IdlType,
}

/// `enum Name { "a", "b" };`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDef {
    pub name: Ident,
    pub values: Vec<Ident>,
}

/// Unresolved type expression.
///
/// The parser accepts any nesting; the resolver decides which shapes are
/// supported.
#[derive(Clone, Debug, PartialEq)]
pub enum IdlType {
    Simple(Ident),
    Nullable(Box<IdlType>, TextRange),
    Array(Box<IdlType>, TextRange),
    Union(Vec<IdlType>, TextRange),
}

impl IdlType {
    pub fn range(&self) -> TextRange {
        match self {
            IdlType::Simple(ident) => ident.range,
            IdlType::Nullable(_, range) | IdlType::Array(_, range) | IdlType::Union(_, range) => {
                *range
            }
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, IdlType::Simple(_))
    }
}

impl std::fmt::Display for IdlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdlType::Simple(ident) => write!(f, "{}", ident.text),
            IdlType::Nullable(inner, _) => write!(f, "{inner}?"),
            IdlType::Array(inner, _) => write!(f, "{inner}[]"),
            IdlType::Union(members, _) => {
                write!(f, "(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, ")")
            }
        }
    }
}
