//! Tree values.

/// One node of a tree: its concrete kind and attribute values.
///
/// Equality ignores field order.
#[derive(Clone, Debug)]
pub struct AstNode {
    pub kind: String,
    pub fields: Vec<(String, Value)>,
}

impl AstNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing an existing one of the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.field(name) == Some(value))
    }
}

/// Attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Boolean(bool),
    Double(f64),
    /// Enum token.
    Enum(String),
    Node(Box<AstNode>),
    List(Vec<Value>),
}

impl Value {
    pub fn enum_token(token: impl Into<String>) -> Self {
        Value::Enum(token.into())
    }

    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_node(&self) -> Option<&AstNode> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Double(_) => "double",
            Value::Enum(_) => "enum token",
            Value::Node(_) => "node",
            Value::List(_) => "list",
        }
    }
}

impl From<AstNode> for Value {
    fn from(node: AstNode) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
