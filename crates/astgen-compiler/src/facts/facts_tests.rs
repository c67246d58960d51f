use std::fmt::Write;

use indoc::indoc;

use crate::Config;
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{MINI_GRAMMAR, MINI_ORDER, Stage, mini_schema, run, schema_with};

fn max_supers(schema: &astgen_core::Schema) -> String {
    let mut out = String::new();
    for (leaf, sup) in &schema.facts().max_super {
        writeln!(out, "{leaf} -> {sup}").unwrap();
    }
    out
}

const AMBIGUOUS: &str = indoc! {r#"
    interface P { };
    interface Q { };
    interface L1 : P { };
    interface L2 : P { };
    L1 implements Q;
    L2 implements Q;
    interface Holder { attribute P p; attribute Q q; };
"#};

#[test]
fn fixture_max_super() {
    insta::assert_snapshot!(max_supers(&mini_schema()), @r"
    ArrayExpression -> Expression
    ArrowExpression -> Expression
    BinaryExpression -> Expression
    BindingIdentifier -> BindingIdentifier
    BindingWithDefault -> BindingBindingWithDefault
    CallExpression -> Expression
    ExpressionStatement -> Statement
    FunctionDeclaration -> Statement
    IdentifierExpression -> Expression
    IfStatement -> Statement
    LiteralBooleanExpression -> Expression
    LiteralNumericExpression -> Expression
    ReturnStatement -> Statement
    Script -> Script
    SpreadElement -> SpreadElementExpression
    VariableDeclarationStatement -> Statement
    VariableDeclarator -> VariableDeclarator
    ");
}

#[test]
fn leaf_sets_are_sorted() {
    let schema = mini_schema();
    assert_eq!(
        schema.leaves_of("Statement"),
        [
            "ExpressionStatement",
            "FunctionDeclaration",
            "IfStatement",
            "ReturnStatement",
            "VariableDeclarationStatement",
        ]
    );
    assert_eq!(schema.leaves_of("Script"), ["Script"]);
    assert_eq!(
        schema.leaves_of("BindingBindingWithDefault"),
        ["BindingIdentifier", "BindingWithDefault"]
    );
}

#[test]
fn leaf_and_stateful_facts() {
    let schema = mini_schema();
    let graph = schema.graph();
    assert!(graph.is_leaf("IfStatement"));
    assert!(!graph.is_leaf("Statement"));

    let script = schema.node("Script");
    let stateful: Vec<_> = script.stateful_attributes().map(|a| a.name.as_str()).collect();
    assert_eq!(stateful, ["statements"]);

    let binary = schema.node("BinaryExpression");
    let stateful: Vec<_> = binary.stateful_attributes().map(|a| a.name.as_str()).collect();
    assert_eq!(stateful, ["left", "right"]);
}

#[test]
fn tie_is_reported_and_broken_by_name() {
    let run = run(AMBIGUOUS, "[Holder]\np\nq\n", &Config::default(), Stage::Facts);

    assert_eq!(
        run.diagnostics.kinds(),
        [
            DiagnosticKind::AmbiguousMaxSuper,
            DiagnosticKind::AmbiguousMaxSuper
        ]
    );
    assert!(!run.diagnostics.has_errors());
    assert_eq!(run.facts.max_super["L1"], "P");
    insta::assert_snapshot!(
        run.diagnostics.iter().next().unwrap().to_string(),
        @"warning at 44..46: ambiguous max-super: `L1` could widen to any of `P`, `Q`; picked `P` (hint: list the intended type in the category table)"
    );
}

#[test]
fn category_table_settles_tie() {
    let config = Config::default().categories(["Q"]);
    let run = run(AMBIGUOUS, "[Holder]\np\nq\n", &config, Stage::Facts);

    assert!(run.diagnostics.is_empty(), "{}", run.diagnostics);
    assert_eq!(run.facts.max_super["L1"], "Q");
    assert_eq!(run.facts.max_super["L2"], "Q");
}

#[test]
fn leaf_beats_equal_sized_union() {
    let grammar = indoc! {r#"
        interface A { };
        typedef (A) JustA;
        interface Holder { attribute JustA x; };
    "#};
    let schema = schema_with(grammar, "[Holder]\nx\n", &Config::default());

    assert_eq!(schema.max_super("A"), "A");
}

#[test]
fn single_leaf_category_does_not_widen() {
    let grammar = indoc! {r#"
        interface Binding { };
        interface BindingIdentifier : Binding { attribute DOMString name; };
        interface Holder { attribute Binding target; };
    "#};
    let order = "[BindingIdentifier]\nname\n[Holder]\ntarget\n";
    let config = Config::default().categories(["Binding"]);
    let run = run(grammar, order, &config, Stage::Facts);

    assert!(run.diagnostics.is_empty(), "{}", run.diagnostics);
    assert_eq!(run.facts.max_super["BindingIdentifier"], "BindingIdentifier");
}

#[test]
fn slot_narrower_than_category_limits_widening() {
    let grammar = indoc! {r#"
        interface Expression { };
        interface Identifier : Expression { attribute DOMString name; };
        interface Literal : Expression { attribute double value; };
        interface Member : Expression {
          attribute Expression object;
          attribute Identifier property;
        };
    "#};
    let order = "[Identifier]\nname\n[Literal]\nvalue\n[Member]\nobject\nproperty\n";
    let schema = schema_with(grammar, order, &Config::default());

    assert_eq!(schema.max_super("Identifier"), "Identifier");
    assert_eq!(schema.max_super("Literal"), "Expression");
    assert_eq!(schema.max_super("Member"), "Expression");
}

#[test]
fn facts_are_deterministic() {
    let first = run(MINI_GRAMMAR, MINI_ORDER, &Config::default(), Stage::Facts);
    let second = run(MINI_GRAMMAR, MINI_ORDER, &Config::default(), Stage::Facts);
    assert_eq!(first.facts, second.facts);
    assert_eq!(first.graph, second.graph);
}
