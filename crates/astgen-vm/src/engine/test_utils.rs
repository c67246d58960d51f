//! Shared fixture schema and tree builders.

use astgen_compiler::{Generator, SourceMap};
use astgen_core::{Primitive, Schema, SemanticType};

use super::{AstNode, Value};

const MINI_GRAMMAR: &str = include_str!("../../../astgen-compiler/fixtures/mini.webidl");
const MINI_ORDER: &str = include_str!("../../../astgen-compiler/fixtures/mini.order");

pub fn mini_schema() -> Schema {
    let mut sources = SourceMap::new();
    let grammar = sources.add_inline(MINI_GRAMMAR);
    let order = sources.add_inline(MINI_ORDER);
    Generator::default()
        .analyze(&sources, grammar, order)
        .expect("fixture grammar is valid")
        .schema
}

pub fn ident(name: &str) -> AstNode {
    AstNode::new("IdentifierExpression").with("name", name)
}

pub fn num(value: f64) -> AstNode {
    AstNode::new("LiteralNumericExpression").with("value", value)
}

pub fn binary(left: AstNode, operator: &str, right: AstNode) -> AstNode {
    AstNode::new("BinaryExpression")
        .with("left", left)
        .with("operator", Value::enum_token(operator))
        .with("right", right)
}

pub fn binding(name: &str) -> AstNode {
    AstNode::new("BindingIdentifier").with("name", name)
}

pub fn expr_stmt(expression: AstNode) -> AstNode {
    AstNode::new("ExpressionStatement").with("expression", expression)
}

pub fn script(statements: Vec<AstNode>) -> AstNode {
    AstNode::new("Script")
        .with("directives", Value::list(Vec::<String>::new()))
        .with("statements", Value::list(statements))
}

/// A script touching every shape: primitives, enums, lists, optional
/// lists, lists of optionals, nested nodes and union slots.
pub fn sample_script() -> AstNode {
    let declaration = AstNode::new("VariableDeclarationStatement")
        .with("kind", Value::enum_token("let"))
        .with(
            "declarators",
            Value::list([AstNode::new("VariableDeclarator")
                .with("binding", binding("x"))
                .with("init", Some(num(1.0)))]),
        );
    let call = AstNode::new("CallExpression")
        .with("callee", ident("f"))
        .with(
            "arguments",
            Value::list([
                AstNode::new("SpreadElement").with(
                    "expression",
                    AstNode::new("ArrayExpression")
                        .with("elements", Value::list([None, Some(num(2.0))])),
                ),
                ident("x"),
            ]),
        );
    let branch = AstNode::new("IfStatement")
        .with(
            "test",
            AstNode::new("LiteralBooleanExpression").with("value", true),
        )
        .with("consequent", expr_stmt(call))
        .with("alternate", Value::Null);
    let function = AstNode::new("FunctionDeclaration")
        .with("name", binding("g"))
        .with(
            "params",
            Value::list([AstNode::new("BindingWithDefault")
                .with("binding", binding("a"))
                .with("init", num(0.0))]),
        )
        .with(
            "body",
            Value::list([AstNode::new("ReturnStatement")
                .with("expression", Some(binary(ident("a"), "+", num(1.0))))]),
        );
    let arrow = AstNode::new("ArrowExpression")
        .with("params", Value::list(Vec::<AstNode>::new()))
        .with("body", Value::Null);

    script(vec![declaration, branch, function, expr_stmt(arrow)])
        .with("directives", Value::list(["use strict"]))
}

/// Smallest well-typed instance of a leaf: nulls, empty lists, first enum
/// tokens and the first leaf of every node slot.
pub fn minimal(schema: &Schema, kind: &str) -> AstNode {
    let mut node = AstNode::new(kind);
    for attr in &schema.node(kind).attributes {
        node.set(&attr.name, minimal_value(schema, &attr.ty));
    }
    node
}

fn minimal_value(schema: &Schema, ty: &SemanticType) -> Value {
    match ty {
        SemanticType::Value(Primitive::String) => Value::from(""),
        SemanticType::Value(Primitive::Boolean) => Value::Boolean(false),
        SemanticType::Value(Primitive::Double) => Value::Double(0.0),
        SemanticType::Enum(name) => {
            let decl = schema.graph().enum_decl(name).expect("enum is declared");
            Value::enum_token(&decl.values[0])
        }
        SemanticType::Node(slot) => minimal(schema, &schema.leaves_of(slot)[0]).into(),
        SemanticType::Nullable(_) => Value::Null,
        SemanticType::List(_) => Value::List(Vec::new()),
        SemanticType::Named(_) | SemanticType::Union(_) => panic!("unresolved type {ty}"),
    }
}
