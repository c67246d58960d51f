use astgen_core::SemanticType;

use super::test_utils::{binary, expr_stmt, ident, minimal, mini_schema, num, sample_script};
use super::{
    AstNode, Director, Fields, Reduced, Reducer, RuntimeError, Thunk, ThunkedDirector,
    ThunkedReducer, Value,
};

/// Records the kind of every reduced node and the field names it received.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Reducer for Recorder {
    type State = String;

    fn reduce(&mut self, node: &AstNode, fields: Fields<String>) -> Result<String, RuntimeError> {
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        self.calls.push(format!("{}({})", node.kind, names.join(", ")));
        Ok(node.kind.clone())
    }
}

#[test]
fn leaves_receive_stateful_fields_only() {
    let schema = mini_schema();
    let mut recorder = Recorder::default();
    let tree = binary(ident("a"), "+", num(1.0));
    let result = Director::new(&schema)
        .reduce_node(&mut recorder, &tree)
        .unwrap();

    assert_eq!(result, "BinaryExpression");
    assert_eq!(
        recorder.calls,
        [
            "IdentifierExpression()",
            "LiteralNumericExpression()",
            "BinaryExpression(left, right)",
        ]
    );
}

#[test]
fn wrappers_keep_their_shape() {
    let schema = mini_schema();
    let ty = SemanticType::list(SemanticType::nullable(SemanticType::node("Expression")));
    let value = Value::list([None, Some(ident("x"))]);
    let reduced = Director::new(&schema)
        .reduce(&mut Recorder::default(), &ty, &value)
        .unwrap();
    assert_eq!(
        reduced,
        Reduced::List(vec![
            Reduced::Null,
            Reduced::State("IdentifierExpression".to_owned()),
        ])
    );
}

#[test]
fn sample_tree_visits_children_before_parents() {
    let schema = mini_schema();
    let mut recorder = Recorder::default();
    Director::new(&schema)
        .reduce_node(&mut recorder, &sample_script())
        .unwrap();
    assert_eq!(recorder.calls.len(), 25);
    assert_eq!(recorder.calls.last().unwrap(), "Script(statements)");
    assert_eq!(recorder.calls[0], "BindingIdentifier()");
}

#[test]
fn dispatch_is_total_over_every_interface() {
    let schema = mini_schema();
    let director = Director::new(&schema);
    let mut checked = 0;
    for decl in schema.graph().nodes().filter(|decl| !decl.is_leaf()) {
        for leaf in schema.leaves_of(&decl.name) {
            let instance: Value = minimal(&schema, leaf).into();
            let reduced = director
                .reduce(&mut Recorder::default(), &SemanticType::node(&decl.name), &instance)
                .unwrap();
            assert_eq!(reduced, Reduced::State(leaf.clone()));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn ill_typed_trees_are_rejected_before_dispatch() {
    let schema = mini_schema();
    let mut recorder = Recorder::default();
    let err = Director::new(&schema)
        .reduce(&mut recorder, &SemanticType::node("Statement"), &num(1.0).into())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Verify(_)));
    assert!(recorder.calls.is_empty());
}

/// Forces only the attributes it names and counts every reduction.
struct Selective {
    force: Vec<&'static str>,
    reduced: Vec<String>,
}

impl ThunkedReducer for Selective {
    type State = usize;

    fn reduce(&mut self, node: &AstNode, fields: Vec<(String, Thunk<'_>)>) -> Result<usize, RuntimeError> {
        self.reduced.push(node.kind.clone());
        let mut total = 1;
        for (name, thunk) in fields {
            if !self.force.contains(&name.as_str()) {
                continue;
            }
            if let Reduced::State(count) = thunk.force(self)? {
                total += count;
            }
        }
        Ok(total)
    }
}

#[test]
fn unforced_thunks_are_never_evaluated() {
    let schema = mini_schema();
    let tree = AstNode::new("IfStatement")
        .with("test", ident("t"))
        .with("consequent", expr_stmt(ident("c")))
        .with("alternate", Some(expr_stmt(ident("a"))));

    let mut lazy = Selective {
        force: vec![],
        reduced: vec![],
    };
    let count = ThunkedDirector::new(&schema)
        .reduce_node(&mut lazy, &tree)
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(lazy.reduced, ["IfStatement"]);

    let mut partial = Selective {
        force: vec!["test"],
        reduced: vec![],
    };
    let count = ThunkedDirector::new(&schema)
        .reduce_node(&mut partial, &tree)
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(partial.reduced, ["IfStatement", "IdentifierExpression"]);
}

#[test]
fn forced_thunks_match_eager_dispatch() {
    let schema = mini_schema();
    let mut eager = Selective {
        force: vec!["test", "consequent", "alternate", "expression"],
        reduced: vec![],
    };
    let tree = AstNode::new("IfStatement")
        .with("test", ident("t"))
        .with("consequent", expr_stmt(ident("c")))
        .with("alternate", Value::Null);
    let count = ThunkedDirector::new(&schema)
        .reduce_node(&mut eager, &tree)
        .unwrap();
    assert_eq!(count, 4);
    assert_eq!(
        eager.reduced,
        [
            "IfStatement",
            "IdentifierExpression",
            "ExpressionStatement",
            "IdentifierExpression",
        ]
    );
}
