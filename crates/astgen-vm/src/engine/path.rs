//! Structural path accessors.

use super::{AstNode, Value};

/// One step into a node: an attribute of a concrete kind, optionally an
/// element of that attribute's list.
///
/// Two paths are equal when they name the same kind, attribute and index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    leaf: String,
    attribute: String,
    index: Option<usize>,
}

impl Path {
    pub fn new(leaf: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            leaf: leaf.into(),
            attribute: attribute.into(),
            index: None,
        }
    }

    pub fn indexed(leaf: impl Into<String>, attribute: impl Into<String>, index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::new(leaf, attribute)
        }
    }

    /// The addressed value, or `None` for another kind, a null value, a
    /// null list or an index out of range.
    pub fn apply<'a>(&self, node: &'a AstNode) -> Option<&'a Value> {
        if node.kind != self.leaf {
            return None;
        }
        let value = node.field(&self.attribute)?;
        let addressed = match self.index {
            None => value,
            Some(index) => value.as_list()?.get(index)?,
        };
        (!addressed.is_null()).then_some(addressed)
    }

    pub fn property_name(&self) -> String {
        match self.index {
            None => self.attribute.clone(),
            Some(index) => format!("{}[{index}]", self.attribute),
        }
    }
}
