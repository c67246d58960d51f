//! JSON codec: `type` discriminator plus one entry per attribute, in
//! attribute order.

use astgen_core::{Primitive, Schema, SemanticType};
use serde_json::{Map, Value as Json};

use super::{AstNode, Value};

const DISCRIMINATOR: &str = "type";

/// Site name used for errors at the top of the document.
const ROOT: &str = "<root>";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeserializeError {
    #[error("expected a node object")]
    NotAnObject,

    #[error("node object has no string `type`")]
    MissingDiscriminator,

    #[error("unknown node type `{0}`")]
    UnknownType(String),

    #[error("`{found}` does not fit `{expected}`")]
    NotAssignable { found: String, expected: String },

    #[error("`{node}` is missing field `{field}`")]
    MissingField { node: String, field: String },

    #[error("`{node}.{field}`: expected {expected}, found {found}")]
    WrongKind {
        node: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown {enum_name} token `{token}`")]
    UnknownEnumToken { enum_name: String, token: String },
}

/// Encode a node; attributes the node lacks are skipped.
pub fn serialize(schema: &Schema, node: &AstNode) -> Json {
    let mut object = Map::new();
    object.insert(DISCRIMINATOR.to_owned(), Json::String(node.kind.clone()));
    if let Some(decl) = schema.graph().node(&node.kind) {
        for attr in &decl.attributes {
            if let Some(value) = node.field(&attr.name) {
                object.insert(attr.name.clone(), encode(schema, value));
            }
        }
    }
    Json::Object(object)
}

fn encode(schema: &Schema, value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::String(s) | Value::Enum(s) => Json::String(s.clone()),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Double(d) => serde_json::json!(d),
        Value::Node(node) => serialize(schema, node),
        Value::List(items) => Json::Array(items.iter().map(|v| encode(schema, v)).collect()),
    }
}

/// Decode `json` as a value of type `ty`.
pub fn deserialize(schema: &Schema, ty: &SemanticType, json: &Json) -> Result<Value, DeserializeError> {
    Decoder { schema }.decode(ty, json, ROOT, ROOT)
}

struct Decoder<'s> {
    schema: &'s Schema,
}

impl Decoder<'_> {
    fn decode(
        &self,
        ty: &SemanticType,
        json: &Json,
        node: &str,
        field: &str,
    ) -> Result<Value, DeserializeError> {
        let wrong_kind = |expected: &'static str| DeserializeError::WrongKind {
            node: node.to_owned(),
            field: field.to_owned(),
            expected,
            found: describe(json),
        };

        match ty {
            SemanticType::Value(Primitive::String) => json
                .as_str()
                .map(Value::from)
                .ok_or_else(|| wrong_kind("a string")),
            SemanticType::Value(Primitive::Boolean) => json
                .as_bool()
                .map(Value::Boolean)
                .ok_or_else(|| wrong_kind("a boolean")),
            SemanticType::Value(Primitive::Double) => json
                .as_f64()
                .map(Value::Double)
                .ok_or_else(|| wrong_kind("a number")),
            SemanticType::Enum(name) => {
                let token = json.as_str().ok_or_else(|| wrong_kind("a string token"))?;
                let known = self
                    .schema
                    .graph()
                    .enum_decl(name)
                    .is_some_and(|decl| decl.index_of(token).is_some());
                if !known {
                    return Err(DeserializeError::UnknownEnumToken {
                        enum_name: name.clone(),
                        token: token.to_owned(),
                    });
                }
                Ok(Value::enum_token(token))
            }
            SemanticType::Node(slot) => self.decode_node(slot, json).map(Value::from),
            SemanticType::Nullable(_) if json.is_null() => Ok(Value::Null),
            SemanticType::Nullable(inner) => self.decode(inner, json, node, field),
            SemanticType::List(inner) => {
                let items = json.as_array().ok_or_else(|| wrong_kind("an array"))?;
                items
                    .iter()
                    .map(|item| self.decode(inner, item, node, field))
                    .collect::<Result<_, _>>()
                    .map(Value::List)
            }
            SemanticType::Named(_) | SemanticType::Union(_) => {
                Err(DeserializeError::UnknownType(ty.to_string()))
            }
        }
    }

    fn decode_node(&self, slot: &str, json: &Json) -> Result<AstNode, DeserializeError> {
        let object = json.as_object().ok_or(DeserializeError::NotAnObject)?;
        let kind = object
            .get(DISCRIMINATOR)
            .and_then(Json::as_str)
            .ok_or(DeserializeError::MissingDiscriminator)?;
        let decl = self
            .schema
            .graph()
            .node(kind)
            .filter(|decl| decl.is_leaf())
            .ok_or_else(|| DeserializeError::UnknownType(kind.to_owned()))?;
        if !self.schema.is_assignable(kind, slot) {
            return Err(DeserializeError::NotAssignable {
                found: kind.to_owned(),
                expected: slot.to_owned(),
            });
        }

        let mut node = AstNode::new(kind);
        for attr in &decl.attributes {
            let json = object
                .get(&attr.name)
                .ok_or_else(|| DeserializeError::MissingField {
                    node: kind.to_owned(),
                    field: attr.name.clone(),
                })?;
            let value = self.decode(&attr.ty, json, kind, &attr.name)?;
            node.fields.push((attr.name.clone(), value));
        }
        Ok(node)
    }
}

fn describe(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
