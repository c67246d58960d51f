use std::fmt::Write;

use astgen_core::idl::{Definition, IdlType};
use indoc::indoc;

use super::parse;
use crate::SourceId;
use crate::diagnostics::DiagnosticKind;

fn snapshot(input: &str) -> String {
    let result = parse(input, SourceId::default());
    let mut out = String::new();
    for def in &result.grammar.definitions {
        match def {
            Definition::Interface(i) => {
                write!(out, "interface {}", i.name.text).unwrap();
                if let Some(parent) = &i.inheritance {
                    write!(out, " : {}", parent.text).unwrap();
                }
                writeln!(out).unwrap();
                for m in &i.members {
                    writeln!(out, "  {} {}", m.ty, m.name.text).unwrap();
                }
            }
            Definition::Implements(i) => {
                writeln!(out, "{} implements {}", i.target.text, i.implements.text).unwrap();
            }
            Definition::Typedef(t) => writeln!(out, "typedef {} {}", t.ty, t.name.text).unwrap(),
            Definition::Enum(e) => {
                let values: Vec<_> = e.values.iter().map(|v| format!("{:?}", v.text)).collect();
                writeln!(out, "enum {} {}", e.name.text, values.join(" ")).unwrap();
            }
        }
    }
    if !result.diagnostics.is_empty() {
        writeln!(out, "---").unwrap();
        writeln!(out, "{}", result.diagnostics).unwrap();
    }
    out
}

fn error_kinds(input: &str) -> Vec<DiagnosticKind> {
    parse(input, SourceId::default()).diagnostics.kinds()
}

#[test]
fn interfaces_with_inheritance() {
    let input = indoc! {r#"
        interface Node { };
        interface Expression : Node { };
        interface BinaryExpression : Expression {
          attribute BinaryOperator operator;
          readonly attribute Expression left;
          attribute Expression right;
        };
    "#};

    insta::assert_snapshot!(snapshot(input), @r"
    interface Node
    interface Expression : Node
    interface BinaryExpression : Expression
      BinaryOperator operator
      Expression left
      Expression right
    ");
}

#[test]
fn type_suffixes_and_sequences() {
    let input = indoc! {r#"
        interface Foo {
          attribute Expression? a;
          attribute Expression[] b;
          attribute Expression?[] c;
          attribute sequence<Expression>? d;
          attribute FrozenArray<Statement> e;
          attribute (SpreadElement or Expression)?[] f;
        };
    "#};

    insta::assert_snapshot!(snapshot(input), @r"
    interface Foo
      Expression? a
      Expression[] b
      Expression?[] c
      Expression[]? d
      Statement[] e
      (SpreadElement or Expression)?[] f
    ");
}

#[test]
fn typedefs_enums_and_implements() {
    let input = indoc! {r#"
        typedef (Binding or BindingWithDefault) BindingBindingWithDefault;
        typedef DOMString string;
        enum VariableDeclarationKind { "var", "let", "const", };
        ClassDeclaration implements Statement;
    "#};

    insta::assert_snapshot!(snapshot(input), @r#"
    typedef (Binding or BindingWithDefault) BindingBindingWithDefault
    typedef DOMString string
    enum VariableDeclarationKind "var" "let" "const"
    ClassDeclaration implements Statement
    "#);
}

#[test]
fn extended_attributes_and_comments_are_skipped() {
    let input = indoc! {r#"
        // the root
        [Constructor(Foo a), NoInterfaceObject]
        interface Program {
          /* body */
          [Deprecated] attribute [Clamp] double value;
        };
    "#};

    insta::assert_snapshot!(snapshot(input), @r"
    interface Program
      double value
    ");
}

#[test]
fn keywords_allowed_as_member_names() {
    let input = "interface Foo { attribute DOMString enum; attribute boolean or; };";

    insta::assert_snapshot!(snapshot(input), @r"
    interface Foo
      DOMString enum
      boolean or
    ");
}

#[test]
fn spans_point_at_names() {
    let input = "interface Foo : Bar { attribute Baz? qux; };";
    let result = parse(input, SourceId::default());
    let Definition::Interface(i) = &result.grammar.definitions[0] else {
        panic!("expected interface");
    };

    let range = |r: astgen_core::TextRange| &input[r.start as usize..r.end as usize];
    assert_eq!(range(i.name.range), "Foo");
    assert_eq!(range(i.inheritance.as_ref().unwrap().range), "Bar");
    assert_eq!(range(i.members[0].ty.range()), "Baz?");
    let IdlType::Nullable(inner, _) = &i.members[0].ty else {
        panic!("expected nullable");
    };
    assert_eq!(range(inner.range()), "Baz");
}

#[test]
fn recovers_after_bad_member() {
    let input = indoc! {r#"
        interface Foo {
          attribute ;
          attribute Bar ok;
        };
        interface Baz { };
    "#};

    insta::assert_snapshot!(snapshot(input), @r"
    interface Foo
      Bar ok
    interface Baz
    ---
    error at 28..29: expected a type
    ");
}

#[test]
fn recovers_after_bad_definition() {
    let input = "garbage here; interface Ok { };";

    insta::assert_snapshot!(snapshot(input), @r"
    interface Ok
    ---
    error at 0..7: expected `interface`, `typedef`, `enum` or `implements`
    ");
}

#[test]
fn missing_semicolon_keeps_definition() {
    let input = "interface A { } interface B { };";

    insta::assert_snapshot!(snapshot(input), @r"
    interface A
    interface B
    ---
    error at 16..25: expected `;`, found `interface`
    ");
}

#[test]
fn unclosed_interface() {
    let input = "interface A {\n  attribute B c;\n";

    assert_eq!(error_kinds(input), [DiagnosticKind::UnclosedBlock]);
    let result = parse(input, SourceId::default());
    assert!(result.grammar.definitions.is_empty());
    insta::assert_snapshot!(result.diagnostics.to_string(), @"error at 31..31: missing closing `}`: interface `A` (related: block opened here at 12..13)");
}

#[test]
fn garbage_is_reported() {
    assert_eq!(
        error_kinds("interface A { attribute B @c; };"),
        [DiagnosticKind::UnexpectedToken]
    );
}

#[test]
fn stray_closing_brace() {
    assert_eq!(
        error_kinds("}; interface A { };"),
        [DiagnosticKind::ExpectedDefinition]
    );
}

#[test]
fn enum_requires_strings() {
    assert_eq!(
        error_kinds("enum Op { plus };"),
        [DiagnosticKind::ExpectedString]
    );
}

#[test]
fn unclosed_union() {
    assert_eq!(
        error_kinds("typedef (A or B Name;"),
        [DiagnosticKind::ExpectedToken]
    );
}
