//! Reducer-family plan, shared by the plain, monoidal, reconstructing,
//! flattening and range-checking reducers.

use astgen_core::{FoldForm, FoldPlan, Schema, SemanticType};

use super::data::Field;
use super::director::DirectorPlan;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducerPlan {
    pub any_node: String,
    /// One entry per leaf the director reaches, sorted by name.
    pub leaves: Vec<LeafReducer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafReducer {
    pub node: String,
    pub method: String,
    /// Reduced children, in attribute order.
    pub params: Vec<StateParam>,
    pub attributes: Vec<Field>,
    /// Declared return type of the reconstructing reducer.
    pub returns: String,
    pub fold: FoldPlan,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    pub attribute: String,
    pub ty: SemanticType,
    pub form: FoldForm,
}

impl ReducerPlan {
    pub fn build(schema: &Schema, director: &DirectorPlan) -> Self {
        let leaves = director
            .entry
            .iter()
            .map(|case| {
                let decl = schema.node(&case.child);
                let stateful: Vec<_> = decl.stateful_attributes().collect();
                LeafReducer {
                    node: decl.name.clone(),
                    method: case.method.clone(),
                    params: stateful
                        .iter()
                        .map(|attr| StateParam {
                            attribute: attr.name.clone(),
                            ty: attr.ty.clone(),
                            form: FoldForm::of(&attr.ty),
                        })
                        .collect(),
                    attributes: decl
                        .attributes
                        .iter()
                        .map(|a| Field {
                            name: a.name.clone(),
                            ty: a.ty.clone(),
                        })
                        .collect(),
                    returns: schema.max_super(&decl.name).to_owned(),
                    fold: FoldPlan::classify(&stateful),
                }
            })
            .collect();

        Self {
            any_node: director.any_node.clone(),
            leaves,
        }
    }

    pub fn leaf(&self, name: &str) -> Option<&LeafReducer> {
        self.leaves.iter().find(|l| l.node == name)
    }
}
