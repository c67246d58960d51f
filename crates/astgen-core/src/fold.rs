//! Monoidal fold rule shared by the emitters and the runtime.
//!
//! Given the stateful attributes of a leaf, decides how their folded
//! results combine into one monoid value:
//! - none: the identity
//! - one: that attribute's value
//! - two, second a list and first not: fold the list seeded by the first
//! - otherwise: append all in order

use serde::Serialize;

use crate::{Attribute, SemanticType};

/// How a single attribute's reduced result collapses into one monoid value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FoldForm {
    /// `Node`: already a single value.
    Plain,
    /// `Maybe<Node>`: value or identity.
    Optional,
    /// `List<Node>`: fold the list.
    List,
    /// `List<Maybe<Node>>`: fold the present elements.
    ListOfOptional,
    /// `Maybe<List<..>>`: fold the list when present.
    OptionalList,
}

impl FoldForm {
    pub fn of(ty: &SemanticType) -> Self {
        match ty {
            SemanticType::Nullable(inner) if inner.is_list() => FoldForm::OptionalList,
            SemanticType::Nullable(_) => FoldForm::Optional,
            SemanticType::List(inner) if inner.is_nullable() => FoldForm::ListOfOptional,
            SemanticType::List(_) => FoldForm::List,
            _ => FoldForm::Plain,
        }
    }
}

/// Combination of the stateful attributes, by position among them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FoldPlan {
    Identity,
    Single { index: usize },
    Fold1 { seed: usize, list: usize },
    Append { indices: Vec<usize> },
}

impl FoldPlan {
    pub fn classify(stateful: &[&Attribute]) -> Self {
        match stateful {
            [] => FoldPlan::Identity,
            [_] => FoldPlan::Single { index: 0 },
            [first, second] if second.ty.is_list() && !first.ty.is_list() => {
                FoldPlan::Fold1 { seed: 0, list: 1 }
            }
            _ => FoldPlan::Append {
                indices: (0..stateful.len()).collect(),
            },
        }
    }
}
