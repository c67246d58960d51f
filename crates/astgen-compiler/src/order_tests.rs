use indoc::indoc;

use crate::SourceId;
use crate::diagnostics::DiagnosticKind;
use crate::order::parse_order;

fn fields(source: &str, section: &str) -> Vec<String> {
    let (table, diagnostics) = parse_order(source, SourceId::default());
    assert!(diagnostics.is_empty(), "{diagnostics}");
    table
        .section(section)
        .unwrap()
        .fields
        .iter()
        .map(|f| f.text.clone())
        .collect()
}

#[test]
fn sections_keep_field_order() {
    let source = indoc! {"
        [BinaryExpression]
        left
        operator
        right

        [IdentifierExpression]
        name
    "};

    assert_eq!(fields(source, "BinaryExpression"), ["left", "operator", "right"]);
    assert_eq!(fields(source, "IdentifierExpression"), ["name"]);
}

#[test]
fn whitespace_is_trimmed() {
    let source = "  [ Foo ]  \r\n\t a \r\n b\n";
    let (table, diagnostics) = parse_order(source, SourceId::default());
    assert!(diagnostics.is_empty());

    let section = table.section("Foo").unwrap();
    assert_eq!(&source[section.header.range.start as usize..section.header.range.end as usize], "Foo");
    assert_eq!(section.position("b"), Some(1));
    let a = &section.fields[0];
    assert_eq!(&source[a.range.start as usize..a.range.end as usize], "a");
}

#[test]
fn empty_section_is_allowed() {
    let (table, diagnostics) = parse_order("[Program]\n[Script]\nstatements\n", SourceId::default());
    assert!(diagnostics.is_empty());
    assert!(table.section("Program").unwrap().fields.is_empty());
    assert_eq!(table.len(), 2);
}

#[test]
fn errors_are_reported_with_spans() {
    let source = indoc! {"
        orphan
        []
        [Foo]
        a
        a
        [Foo]
        b
        [Bar
    "};
    let (table, diagnostics) = parse_order(source, SourceId::default());

    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::OrderFieldOutsideSection,
            DiagnosticKind::OrderEmptySection,
            DiagnosticKind::OrderDuplicateField,
            DiagnosticKind::OrderDuplicateSection,
            DiagnosticKind::ExpectedToken,
        ]
    );
    assert_eq!(fields_of(&table, "Foo"), ["a"]);
    insta::assert_snapshot!(diagnostics.to_string(), @r"
    error at 0..6: field name before any `[Type]` header
    error at 7..9: empty section header
    error at 18..19: field is listed twice: `a` in `[Foo]` (related: first listed here at 16..17)
    error at 21..24: section is already defined: `Foo` (related: first defined here at 11..14)
    error at 28..32: expected `]` to close the section header
    ");
}

fn fields_of(table: &crate::order::OrderTable, name: &str) -> Vec<String> {
    table
        .section(name)
        .unwrap()
        .fields
        .iter()
        .map(|f| f.text.clone())
        .collect()
}
