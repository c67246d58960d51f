//! Tests for tree verification.

use astgen_core::SemanticType;

use super::test_utils::{binary, ident, mini_schema, num, sample_script, script};
use super::{AstNode, Value, verify};

fn program() -> SemanticType {
    SemanticType::node("Program")
}

#[test]
fn sample_tree_is_well_typed() {
    let schema = mini_schema();
    verify(&schema, &program(), &sample_script().into()).unwrap();
}

#[test]
fn nullable_accepts_null_and_value() {
    let schema = mini_schema();
    let ty = SemanticType::nullable(SemanticType::node("Expression"));
    verify(&schema, &ty, &Value::Null).unwrap();
    verify(&schema, &ty, &num(1.0).into()).unwrap();
}

#[test]
fn abstract_kind_is_rejected() {
    let schema = mini_schema();
    let err = verify(&schema, &program(), &AstNode::new("Program").into()).unwrap_err();
    assert_eq!(err.mismatches, ["`Program` is not a concrete kind"]);
}

#[test]
fn kind_outside_slot_is_rejected() {
    let schema = mini_schema();
    let tree = script(vec![num(1.0)]);
    let err = verify(&schema, &program(), &tree.into()).unwrap_err();
    assert_eq!(
        err.mismatches,
        ["statements[0]: `LiteralNumericExpression` does not fit `Statement`"]
    );
}

#[test]
fn missing_and_extra_fields_are_reported() {
    let schema = mini_schema();
    let node = AstNode::new("IdentifierExpression").with("label", "x");
    let err = verify(&schema, &SemanticType::node("Expression"), &node.into()).unwrap_err();
    assert_eq!(
        err.mismatches,
        [
            "name: missing field",
            "`IdentifierExpression` has no attribute `label`",
        ]
    );
}

#[test]
fn mismatches_carry_paths() {
    let schema = mini_schema();
    let call = AstNode::new("CallExpression")
        .with("callee", ident("f"))
        .with("arguments", Value::list([Value::Boolean(true)]));
    let tree = binary(call, "%", ident("y"));
    let err = verify(&schema, &SemanticType::node("Expression"), &tree.into()).unwrap_err();
    assert_eq!(
        err.mismatches,
        [
            "left.arguments[0]: type: SpreadElementExpression, value: boolean",
            "operator: `%` is not a `BinaryOperator` token",
        ]
    );
    insta::assert_snapshot!(err.to_string(), @r"
    tree does not match the schema
      left.arguments[0]: type: SpreadElementExpression, value: boolean
      operator: `%` is not a `BinaryOperator` token
    ");
}
