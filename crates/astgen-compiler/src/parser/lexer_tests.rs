use super::lexer::{lex, token_text};

/// Format tokens without trivia
fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

/// Format tokens with trivia included
fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let mut out = String::new();
    for token in lex(input) {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) [ ] { } < > : ; , ? ="), @r#"
    ParenOpen "("
    ParenClose ")"
    BracketOpen "["
    BracketClose "]"
    BraceOpen "{"
    BraceClose "}"
    AngleOpen "<"
    AngleClose ">"
    Colon ":"
    Semicolon ";"
    Comma ","
    Question "?"
    Equals "="
    "#);
}

#[test]
fn keywords_and_identifiers() {
    insta::assert_snapshot!(snapshot("interface Interfaces attribute or order sequence FrozenArray"), @r#"
    KwInterface "interface"
    Ident "Interfaces"
    KwAttribute "attribute"
    KwOr "or"
    Ident "order"
    KwSequence "sequence"
    KwFrozenArray "FrozenArray"
    "#);
}

#[test]
fn member_declaration() {
    insta::assert_snapshot!(snapshot("attribute (Expression or Super)? callee;"), @r#"
    KwAttribute "attribute"
    ParenOpen "("
    Ident "Expression"
    KwOr "or"
    Ident "Super"
    ParenClose ")"
    Question "?"
    Ident "callee"
    Semicolon ";"
    "#);
}

#[test]
fn string_literals() {
    insta::assert_snapshot!(snapshot(r#"enum Op { "==", "+=" };"#), @r#"
    KwEnum "enum"
    Ident "Op"
    BraceOpen "{"
    StringLiteral "\"==\""
    Comma ","
    StringLiteral "\"+=\""
    BraceClose "}"
    Semicolon ";"
    "#);
}

#[test]
fn comments_are_trivia() {
    insta::assert_snapshot!(snapshot_raw("// line\nFoo /* block */;"), @r#"
    LineComment "// line"
    Newline "\n"
    Ident "Foo"
    Whitespace " "
    BlockComment "/* block */"
    Semicolon ";"
    "#);
}

#[test]
fn garbage_coalesces() {
    insta::assert_snapshot!(snapshot("Foo @#$ Bar"), @r#"
    Ident "Foo"
    Garbage "@#$"
    Ident "Bar"
    "#);
}

#[test]
fn garbage_at_end() {
    insta::assert_snapshot!(snapshot("Foo ~~"), @r#"
    Ident "Foo"
    Garbage "~~"
    "#);
}
