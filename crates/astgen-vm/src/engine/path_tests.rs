use std::collections::HashSet;

use super::test_utils::{expr_stmt, ident, num, script};
use super::{AstNode, Path, Value};

#[test]
fn fresh_paths_are_equal() {
    assert_eq!(Path::new("IfStatement", "test"), Path::new("IfStatement", "test"));
    assert_eq!(
        Path::indexed("Script", "statements", 1),
        Path::indexed("Script", "statements", 1)
    );
    assert_ne!(
        Path::indexed("Script", "statements", 1),
        Path::indexed("Script", "statements", 2)
    );
    assert_ne!(Path::new("Script", "statements"), Path::indexed("Script", "statements", 0));
    assert_ne!(
        Path::new("ReturnStatement", "expression"),
        Path::new("ExpressionStatement", "expression")
    );

    let set: HashSet<Path> = [
        Path::new("IfStatement", "test"),
        Path::new("IfStatement", "test"),
        Path::indexed("Script", "statements", 0),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn apply_reads_the_attribute() {
    let stmt = expr_stmt(ident("x"));
    let path = Path::new("ExpressionStatement", "expression");
    assert_eq!(path.apply(&stmt), Some(&Value::from(ident("x"))));
    assert_eq!(path.property_name(), "expression");
}

#[test]
fn apply_requires_the_expected_kind() {
    let path = Path::new("ReturnStatement", "expression");
    assert_eq!(path.apply(&expr_stmt(ident("x"))), None);
}

#[test]
fn indexed_paths_stay_in_range() {
    let tree = script(vec![expr_stmt(num(1.0)), expr_stmt(num(2.0))]);
    let second = Path::indexed("Script", "statements", 1);
    assert_eq!(second.apply(&tree), Some(&Value::from(expr_stmt(num(2.0)))));
    assert_eq!(second.property_name(), "statements[1]");
    assert_eq!(Path::indexed("Script", "statements", 2).apply(&tree), None);
}

#[test]
fn indexed_path_over_null_list_is_empty() {
    let arrow = AstNode::new("ArrowExpression")
        .with("params", Value::list(Vec::<AstNode>::new()))
        .with("body", Value::Null);
    assert_eq!(Path::indexed("ArrowExpression", "body", 0).apply(&arrow), None);
    assert_eq!(Path::new("ArrowExpression", "body").apply(&arrow), None);
}

#[test]
fn null_values_read_as_absent() {
    let ret = AstNode::new("ReturnStatement").with("expression", Value::Null);
    assert_eq!(Path::new("ReturnStatement", "expression").apply(&ret), None);

    let array = AstNode::new("ArrayExpression").with(
        "elements",
        Value::List(vec![Value::Null, Value::from(ident("x"))]),
    );
    assert_eq!(Path::indexed("ArrayExpression", "elements", 0).apply(&array), None);
    assert_eq!(
        Path::indexed("ArrayExpression", "elements", 1).apply(&array),
        Some(&Value::from(ident("x")))
    );
}
