//! Type-shaped dispatch over verified trees.
//!
//! An interface slot forwards to the first child (in declaration order)
//! whose leaves hold the runtime kind; a leaf calls the reducer with one
//! reduced result per stateful attribute. Wrappers keep their shape:
//! a `Maybe<Node>` attribute reduces to `Reduced::Null` or a state, a list
//! to `Reduced::List`.

use astgen_core::{Schema, SemanticType};

use super::{AstNode, RuntimeError, Value, invariants, verify};

/// Result of reducing one attribute, shaped like its type.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced<S> {
    State(S),
    Null,
    List(Vec<Reduced<S>>),
}

impl<S> Reduced<S> {
    pub fn into_state(self) -> Option<S> {
        match self {
            Reduced::State(state) => Some(state),
            _ => None,
        }
    }
}

/// Reduced stateful attributes of one node, in attribute order.
pub type Fields<S> = Vec<(String, Reduced<S>)>;

pub trait Reducer {
    type State;

    fn reduce(
        &mut self,
        node: &AstNode,
        fields: Fields<Self::State>,
    ) -> Result<Self::State, RuntimeError>;
}

/// Eager director: every stateful attribute is reduced before its node.
#[derive(Clone, Copy, Debug)]
pub struct Director<'s> {
    schema: &'s Schema,
}

impl<'s> Director<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Reduce `value` through the dispatch function of `ty`.
    pub fn reduce<R: Reducer>(
        &self,
        reducer: &mut R,
        ty: &SemanticType,
        value: &Value,
    ) -> Result<Reduced<R::State>, RuntimeError> {
        verify(self.schema, ty, value)?;
        self.visit(reducer, ty, value)
    }

    /// Reduce a whole tree by its own kind.
    pub fn reduce_node<R: Reducer>(
        &self,
        reducer: &mut R,
        node: &AstNode,
    ) -> Result<R::State, RuntimeError> {
        let root = Value::Node(Box::new(node.clone()));
        verify(self.schema, &SemanticType::node(&node.kind), &root)?;
        self.dispatch(reducer, &node.kind, node)
    }

    fn visit<R: Reducer>(
        &self,
        reducer: &mut R,
        ty: &SemanticType,
        value: &Value,
    ) -> Result<Reduced<R::State>, RuntimeError> {
        match (ty, value) {
            (SemanticType::Node(slot), Value::Node(node)) => {
                self.dispatch(reducer, slot, node).map(Reduced::State)
            }
            (SemanticType::Nullable(_), Value::Null) => Ok(Reduced::Null),
            (SemanticType::Nullable(inner), _) => self.visit(reducer, inner, value),
            (SemanticType::List(inner), Value::List(items)) => items
                .iter()
                .map(|item| self.visit(reducer, inner, item))
                .collect::<Result<_, _>>()
                .map(Reduced::List),
            _ => invariants::mismatched(ty, value),
        }
    }

    fn dispatch<R: Reducer>(
        &self,
        reducer: &mut R,
        slot: &str,
        node: &AstNode,
    ) -> Result<R::State, RuntimeError> {
        let leaf = dispatch_leaf(self.schema, slot, &node.kind);
        let decl = self.schema.node(leaf);
        let mut fields = Vec::new();
        for attr in decl.stateful_attributes() {
            let value = invariants::ensure_field(node, &attr.name);
            fields.push((attr.name.clone(), self.visit(reducer, &attr.ty, value)?));
        }
        reducer.reduce(node, fields)
    }
}

/// Walk interface dispatch from `slot` down to the leaf named `kind`.
fn dispatch_leaf<'s>(schema: &'s Schema, slot: &'s str, kind: &str) -> &'s str {
    let mut current = slot;
    while !schema.node(current).is_leaf() {
        current = schema
            .dispatch_child(current, kind)
            .unwrap_or_else(|| invariants::not_reached(current, kind));
    }
    if current != kind {
        invariants::not_reached(slot, kind);
    }
    current
}

/// Suspended reduction of one attribute.
///
/// Nothing under the attribute is visited until [`Thunk::force`] runs.
#[derive(Clone, Copy, Debug)]
pub struct Thunk<'a> {
    schema: &'a Schema,
    ty: &'a SemanticType,
    value: &'a Value,
}

impl<'a> Thunk<'a> {
    pub fn force<R: ThunkedReducer>(&self, reducer: &mut R) -> Result<Reduced<R::State>, RuntimeError> {
        ThunkedDirector::new(self.schema).visit(reducer, self.ty, self.value)
    }

    /// The suspended value.
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

pub trait ThunkedReducer {
    type State;

    fn reduce(
        &mut self,
        node: &AstNode,
        fields: Vec<(String, Thunk<'_>)>,
    ) -> Result<Self::State, RuntimeError>;
}

/// Lazy director: a leaf receives thunks and forces only what it needs.
#[derive(Clone, Copy, Debug)]
pub struct ThunkedDirector<'s> {
    schema: &'s Schema,
}

impl<'s> ThunkedDirector<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn reduce<R: ThunkedReducer>(
        &self,
        reducer: &mut R,
        ty: &SemanticType,
        value: &Value,
    ) -> Result<Reduced<R::State>, RuntimeError> {
        verify(self.schema, ty, value)?;
        self.visit(reducer, ty, value)
    }

    pub fn reduce_node<R: ThunkedReducer>(
        &self,
        reducer: &mut R,
        node: &AstNode,
    ) -> Result<R::State, RuntimeError> {
        let root = Value::Node(Box::new(node.clone()));
        verify(self.schema, &SemanticType::node(&node.kind), &root)?;
        self.dispatch(reducer, &node.kind, node)
    }

    fn visit<R: ThunkedReducer>(
        &self,
        reducer: &mut R,
        ty: &SemanticType,
        value: &Value,
    ) -> Result<Reduced<R::State>, RuntimeError> {
        match (ty, value) {
            (SemanticType::Node(slot), Value::Node(node)) => {
                self.dispatch(reducer, slot, node).map(Reduced::State)
            }
            (SemanticType::Nullable(_), Value::Null) => Ok(Reduced::Null),
            (SemanticType::Nullable(inner), _) => self.visit(reducer, inner, value),
            (SemanticType::List(inner), Value::List(items)) => items
                .iter()
                .map(|item| self.visit(reducer, inner, item))
                .collect::<Result<_, _>>()
                .map(Reduced::List),
            _ => invariants::mismatched(ty, value),
        }
    }

    fn dispatch<R: ThunkedReducer>(
        &self,
        reducer: &mut R,
        slot: &str,
        node: &AstNode,
    ) -> Result<R::State, RuntimeError> {
        let leaf = dispatch_leaf(self.schema, slot, &node.kind);
        let fields = self
            .schema
            .node(leaf)
            .stateful_attributes()
            .map(|attr| {
                let thunk = Thunk {
                    schema: self.schema,
                    ty: &attr.ty,
                    value: invariants::ensure_field(node, &attr.name),
                };
                (attr.name.clone(), thunk)
            })
            .collect();
        reducer.reduce(node, fields)
    }
}
