//! The reducer family: monoidal folds, flattening, range checking and
//! structure-preserving reconstruction.

use std::fmt;

use astgen_core::{FoldPlan, Schema};

use super::{AstNode, Director, Fields, Reduced, Reducer, RuntimeError, Value};

/// Associative combination with an identity.
///
/// `concat` may fail; the range checker rejects overlapping siblings there.
pub trait Monoid {
    type Value;

    fn empty(&self) -> Self::Value;

    fn concat(&self, left: Self::Value, right: Self::Value) -> Result<Self::Value, RuntimeError>;
}

/// Collapse reduced attributes into one value following `plan`.
///
/// Absent values become the identity; lists fold left to right.
pub fn fold_fields<M: Monoid>(
    monoid: &M,
    plan: &FoldPlan,
    fields: Vec<Reduced<M::Value>>,
) -> Result<M::Value, RuntimeError> {
    let mut slots: Vec<Option<Reduced<M::Value>>> = fields.into_iter().map(Some).collect();
    let mut take = |index: usize| slots.get_mut(index).and_then(Option::take);

    match plan {
        FoldPlan::Identity => Ok(monoid.empty()),
        FoldPlan::Single { index } => collapse(monoid, take(*index)),
        FoldPlan::Fold1 { seed, list } => {
            let seed = collapse(monoid, take(*seed))?;
            match take(*list) {
                Some(Reduced::List(items)) => fold_items(monoid, seed, items),
                other => monoid.concat(seed, collapse(monoid, other)?),
            }
        }
        FoldPlan::Append { indices } => {
            let mut acc: Option<M::Value> = None;
            for index in indices {
                let value = collapse(monoid, take(*index))?;
                acc = Some(match acc {
                    None => value,
                    Some(left) => monoid.concat(left, value)?,
                });
            }
            Ok(acc.unwrap_or_else(|| monoid.empty()))
        }
    }
}

fn collapse<M: Monoid>(
    monoid: &M,
    reduced: Option<Reduced<M::Value>>,
) -> Result<M::Value, RuntimeError> {
    match reduced {
        Some(Reduced::State(value)) => Ok(value),
        Some(Reduced::List(items)) => fold_items(monoid, monoid.empty(), items),
        Some(Reduced::Null) | None => Ok(monoid.empty()),
    }
}

fn fold_items<M: Monoid>(
    monoid: &M,
    seed: M::Value,
    items: Vec<Reduced<M::Value>>,
) -> Result<M::Value, RuntimeError> {
    items.into_iter().try_fold(seed, |acc, item| {
        let value = collapse(monoid, Some(item))?;
        monoid.concat(acc, value)
    })
}

/// Reducer whose every leaf folds its stateful attributes with a monoid.
pub struct Monoidal<'s, M> {
    schema: &'s Schema,
    monoid: M,
}

impl<'s, M: Monoid> Monoidal<'s, M> {
    pub fn new(schema: &'s Schema, monoid: M) -> Self {
        Self { schema, monoid }
    }

    pub fn monoid(&self) -> &M {
        &self.monoid
    }
}

impl<M: Monoid> Reducer for Monoidal<'_, M> {
    type State = M::Value;

    fn reduce(&mut self, node: &AstNode, fields: Fields<M::Value>) -> Result<M::Value, RuntimeError> {
        let decl = self.schema.node(&node.kind);
        let stateful: Vec<_> = decl.stateful_attributes().collect();
        let plan = FoldPlan::classify(&stateful);
        let values = fields.into_iter().map(|(_, reduced)| reduced).collect();
        fold_fields(&self.monoid, &plan, values)
    }
}

struct Nodes;

impl Monoid for Nodes {
    type Value = Vec<AstNode>;

    fn empty(&self) -> Vec<AstNode> {
        Vec::new()
    }

    fn concat(&self, mut left: Vec<AstNode>, right: Vec<AstNode>) -> Result<Vec<AstNode>, RuntimeError> {
        left.extend(right);
        Ok(left)
    }
}

/// Pre-order sequence of every node in a tree.
pub struct Flattener<'s> {
    inner: Monoidal<'s, Nodes>,
}

impl<'s> Flattener<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            inner: Monoidal::new(schema, Nodes),
        }
    }
}

impl Reducer for Flattener<'_> {
    type State = Vec<AstNode>;

    fn reduce(&mut self, node: &AstNode, fields: Fields<Vec<AstNode>>) -> Result<Vec<AstNode>, RuntimeError> {
        let mut nodes = vec![node.clone()];
        nodes.extend(self.inner.reduce(node, fields)?);
        Ok(nodes)
    }
}

pub fn flatten(schema: &Schema, node: &AstNode) -> Result<Vec<AstNode>, RuntimeError> {
    Director::new(schema).reduce_node(&mut Flattener::new(schema), node)
}

/// Half-open source range reported by a locator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("`{kind}` {range} does not contain {children}")]
    Escapes {
        kind: String,
        range: Span,
        children: Span,
    },

    #[error("sibling ranges {left} and {right} overlap")]
    Overlap { left: Span, right: Span },
}

/// Extents of ordered siblings; absent ranges are the identity.
struct Extent;

impl Monoid for Extent {
    type Value = Option<Span>;

    fn empty(&self) -> Option<Span> {
        None
    }

    fn concat(&self, left: Option<Span>, right: Option<Span>) -> Result<Option<Span>, RuntimeError> {
        match (left, right) {
            (None, other) | (other, None) => Ok(other),
            (Some(left), Some(right)) => {
                if right.start < left.end {
                    return Err(RangeError::Overlap { left, right }.into());
                }
                Ok(Some(Span::new(left.start, right.end)))
            }
        }
    }
}

type Locate<'l> = Box<dyn Fn(&AstNode) -> Option<Span> + 'l>;

/// Checks that children nest inside their parent and siblings are ordered.
///
/// Nodes the locator has no range for pass their children's extent upward.
pub struct RangeChecker<'s> {
    inner: Monoidal<'s, Extent>,
    locate: Locate<'s>,
}

impl<'s> RangeChecker<'s> {
    pub fn new(schema: &'s Schema, locate: impl Fn(&AstNode) -> Option<Span> + 's) -> Self {
        Self {
            inner: Monoidal::new(schema, Extent),
            locate: Box::new(locate),
        }
    }

    /// Check a whole tree.
    pub fn check(&mut self, node: &AstNode) -> Result<(), RuntimeError> {
        let schema = self.inner.schema;
        Director::new(schema).reduce_node(self, node).map(|_| ())
    }
}

impl Reducer for RangeChecker<'_> {
    type State = Option<Span>;

    fn reduce(&mut self, node: &AstNode, fields: Fields<Option<Span>>) -> Result<Option<Span>, RuntimeError> {
        let children = self.inner.reduce(node, fields)?;
        let Some(range) = (self.locate)(node) else {
            return Ok(children);
        };
        if let Some(children) = children
            && !range.contains(&children)
        {
            return Err(RangeError::Escapes {
                kind: node.kind.clone(),
                range,
                children,
            }
            .into());
        }
        Ok(Some(range))
    }
}

type Rewrite<'r> = Box<dyn FnMut(AstNode) -> AstNode + 'r>;

/// Rebuilds every node from its reduced attributes.
///
/// A rewrite hook may replace each rebuilt node; the replacement must still
/// fit the leaf's max-super.
pub struct Reconstructing<'s> {
    schema: &'s Schema,
    rewrite: Option<Rewrite<'s>>,
}

impl<'s> Reconstructing<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            rewrite: None,
        }
    }

    pub fn rewrite(mut self, hook: impl FnMut(AstNode) -> AstNode + 's) -> Self {
        self.rewrite = Some(Box::new(hook));
        self
    }

    /// Rebuild a whole tree.
    pub fn run(&mut self, node: &AstNode) -> Result<AstNode, RuntimeError> {
        let schema = self.schema;
        Director::new(schema).reduce_node(self, node)
    }
}

impl Reducer for Reconstructing<'_> {
    type State = AstNode;

    fn reduce(&mut self, node: &AstNode, fields: Fields<AstNode>) -> Result<AstNode, RuntimeError> {
        let decl = self.schema.node(&node.kind);
        let mut reduced = fields.into_iter();
        let mut rebuilt = AstNode::new(&node.kind);
        for attr in &decl.attributes {
            let value = if attr.is_stateful() {
                reduced.next().map(|(_, r)| into_value(r))
            } else {
                node.field(&attr.name).cloned()
            };
            if let Some(value) = value {
                rebuilt.set(&attr.name, value);
            }
        }

        let Some(rewrite) = self.rewrite.as_mut() else {
            return Ok(rebuilt);
        };
        let result = rewrite(rebuilt);
        let expected = self.schema.max_super(&node.kind);
        if !self.schema.is_assignable(&result.kind, expected) {
            return Err(RuntimeError::Rewrite {
                kind: node.kind.clone(),
                found: result.kind,
                expected: expected.to_owned(),
            });
        }
        Ok(result)
    }
}

fn into_value(reduced: Reduced<AstNode>) -> Value {
    match reduced {
        Reduced::State(node) => node.into(),
        Reduced::Null => Value::Null,
        Reduced::List(items) => Value::List(items.into_iter().map(into_value).collect()),
    }
}
