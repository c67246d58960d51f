use astgen_core::SemanticType;
use serde_json::json;

use super::test_utils::{binary, ident, mini_schema, num, sample_script};
use super::{AstNode, DeserializeError, Value, deserialize, serialize};

fn program() -> SemanticType {
    SemanticType::node("Program")
}

#[test]
fn serialize_writes_discriminator_and_attributes_in_order() {
    let schema = mini_schema();
    let tree = AstNode::new("BinaryExpression")
        .with("right", num(2.0))
        .with("operator", Value::enum_token("*"))
        .with("left", ident("a"));
    let json = serialize(&schema, &tree);
    insta::assert_snapshot!(serde_json::to_string(&json).unwrap(), @r#"{"type":"BinaryExpression","left":{"type":"IdentifierExpression","name":"a"},"operator":"*","right":{"type":"LiteralNumericExpression","value":2.0}}"#);
}

#[test]
fn serialize_lists_and_nulls() {
    let schema = mini_schema();
    let tree = AstNode::new("ArrayExpression").with("elements", Value::list([None, Some(num(1.0))]));
    assert_eq!(
        serialize(&schema, &tree),
        json!({
            "type": "ArrayExpression",
            "elements": [null, { "type": "LiteralNumericExpression", "value": 1.0 }],
        })
    );
}

#[test]
fn round_trip_preserves_trees() {
    let schema = mini_schema();
    let tree = sample_script();
    let json = serialize(&schema, &tree);
    let decoded = deserialize(&schema, &program(), &json).unwrap();
    assert_eq!(decoded, Value::from(tree));
}

#[test]
fn round_trip_ignores_field_order() {
    let schema = mini_schema();
    let tree = binary(ident("a"), "==", ident("b"));
    let json = json!({
        "right": { "name": "b", "type": "IdentifierExpression" },
        "operator": "==",
        "type": "BinaryExpression",
        "left": { "type": "IdentifierExpression", "name": "a" },
    });
    let decoded = deserialize(&schema, &SemanticType::node("Expression"), &json).unwrap();
    assert_eq!(decoded, tree.into());
}

fn decode_err(ty: &SemanticType, json: serde_json::Value) -> DeserializeError {
    deserialize(&mini_schema(), ty, &json).unwrap_err()
}

#[test]
fn unknown_discriminator_fails() {
    let expr = SemanticType::node("Expression");
    assert_eq!(decode_err(&expr, json!([])), DeserializeError::NotAnObject);
    assert_eq!(
        decode_err(&expr, json!({ "name": "a" })),
        DeserializeError::MissingDiscriminator
    );
    assert_eq!(
        decode_err(&expr, json!({ "type": "Nope" })),
        DeserializeError::UnknownType("Nope".to_owned())
    );
    assert_eq!(
        decode_err(&expr, json!({ "type": "Expression" })),
        DeserializeError::UnknownType("Expression".to_owned())
    );
}

#[test]
fn kind_outside_slot_fails() {
    let err = decode_err(
        &SemanticType::node("Statement"),
        json!({ "type": "IdentifierExpression", "name": "a" }),
    );
    assert_eq!(
        err,
        DeserializeError::NotAssignable {
            found: "IdentifierExpression".to_owned(),
            expected: "Statement".to_owned(),
        }
    );
}

#[test]
fn missing_field_is_never_defaulted() {
    let err = decode_err(
        &SemanticType::node("Statement"),
        json!({ "type": "ReturnStatement" }),
    );
    assert_eq!(
        err,
        DeserializeError::MissingField {
            node: "ReturnStatement".to_owned(),
            field: "expression".to_owned(),
        }
    );
}

#[test]
fn wrong_json_kind_fails() {
    let err = decode_err(
        &SemanticType::node("Expression"),
        json!({ "type": "LiteralNumericExpression", "value": "1" }),
    );
    assert_eq!(err.to_string(), "`LiteralNumericExpression.value`: expected a number, found a string");

    let err = decode_err(
        &SemanticType::node("Expression"),
        json!({ "type": "ArrayExpression", "elements": {} }),
    );
    assert_eq!(
        err,
        DeserializeError::WrongKind {
            node: "ArrayExpression".to_owned(),
            field: "elements".to_owned(),
            expected: "an array",
            found: "an object",
        }
    );

    let err = decode_err(&SemanticType::list(SemanticType::node("Expression")), json!(null));
    assert_eq!(err.to_string(), "`<root>.<root>`: expected an array, found null");
}

#[test]
fn unknown_enum_token_fails() {
    let err = decode_err(
        &SemanticType::node("Statement"),
        json!({ "type": "VariableDeclarationStatement", "kind": "val", "declarators": [] }),
    );
    assert_eq!(
        err,
        DeserializeError::UnknownEnumToken {
            enum_name: "VariableDeclarationKind".to_owned(),
            token: "val".to_owned(),
        }
    );
}
