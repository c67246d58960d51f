use indoc::indoc;

use super::*;
use crate::test_utils::{mini_schema, schema};
use crate::{GeneratedFile, Generator};

const TINY: &str = indoc! {r#"
    interface Node {
      [TypeIndicator] readonly attribute Type type;
    };
    interface Expression : Node { };
    interface Literal : Expression {
      attribute double value;
    };
    interface Negate : Expression {
      attribute Expression operand;
    };
    interface Block : Node {
      attribute FrozenArray<Expression> items;
      attribute Expression? default;
    };
"#};

const TINY_ORDER: &str = indoc! {"
    [Literal]
    value

    [Negate]
    operand

    [Block]
    items
    default
"};

fn render_with(grammar: &str, order: &str, config: Config) -> Vec<GeneratedFile> {
    Generator::default()
        .typescript(config)
        .render(&schema(grammar, order))
}

fn tiny(name: &str) -> String {
    file(&render_with(TINY, TINY_ORDER, Config::new().header(None)), name)
}

fn file(files: &[GeneratedFile], name: &str) -> String {
    files
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.contents.clone())
        .unwrap_or_else(|| panic!("no file `{name}`"))
}

/// Indent every non-empty line by `depth` levels.
fn indented(text: &str, depth: usize) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_owned()
            } else {
                format!("{}{line}\n", "  ".repeat(depth))
            }
        })
        .collect()
}

fn names(files: &[GeneratedFile]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn ast_classes_and_unions() {
    insta::assert_snapshot!(tiny(AST_FILE), @r#"
    export type Node = Expression | Block;

    export type Expression = Literal | Negate;

    /** Implements `Expression`. */
    export class Literal {
      readonly type = "Literal" as const;
      value: number;

      constructor(value: number) {
        this.value = value;
      }
    }

    /** Implements `Expression`. */
    export class Negate {
      readonly type = "Negate" as const;
      operand: Expression;

      constructor(operand: Expression) {
        this.operand = operand;
      }
    }

    /** Implements `Node`. */
    export class Block {
      readonly type = "Block" as const;
      items: Array<Expression>;
      default: Expression | null;

      constructor(items: Array<Expression>, _default: Expression | null) {
        this.items = items;
        this.default = _default;
      }
    }
    "#);
}

#[test]
fn director_dispatch() {
    insta::assert_snapshot!(tiny(DIRECTOR_FILE), @r#"
    import * as AST from "./ast";
    import type { Reducer } from "./reducer";

    export function reduceBlock<State>(reducer: Reducer<State>, node: AST.Block): State {
      return reducer.reduceBlock(node, {
        items: reduceListExpression(reducer, node.items),
        default: reduceMaybeExpression(reducer, node.default),
      });
    }

    export function reduceExpression<State>(reducer: Reducer<State>, node: AST.Expression): State {
      switch (node.type) {
        case "Literal":
          return reduceLiteral(reducer, node);
        case "Negate":
          return reduceNegate(reducer, node);
      }
      throw new Error("Not reached");
    }

    export function reduceListExpression<State>(reducer: Reducer<State>, node: Array<AST.Expression>): Array<State> {
      return node.map((element) => reduceExpression(reducer, element));
    }

    export function reduceLiteral<State>(reducer: Reducer<State>, node: AST.Literal): State {
      return reducer.reduceLiteral(node);
    }

    export function reduceMaybeExpression<State>(reducer: Reducer<State>, node: AST.Expression | null): State | null {
      return node === null ? null : reduceExpression(reducer, node);
    }

    export function reduceNegate<State>(reducer: Reducer<State>, node: AST.Negate): State {
      return reducer.reduceNegate(node, {
        operand: reduceExpression(reducer, node.operand),
      });
    }

    export function reduceNode<State>(reducer: Reducer<State>, node: AST.Node): State {
      switch (node.type) {
        case "Literal":
        case "Negate":
          return reduceExpression(reducer, node);
        case "Block":
          return reduceBlock(reducer, node);
      }
      throw new Error("Not reached");
    }

    export function reduce<State>(reducer: Reducer<State>, node: AST.Node): State {
      switch (node.type) {
        case "Block":
          return reduceBlock(reducer, node);
        case "Literal":
          return reduceLiteral(reducer, node);
        case "Negate":
          return reduceNegate(reducer, node);
      }
      throw new Error("Not reached");
    }
    "#);
}

#[test]
fn reducer_interface() {
    insta::assert_snapshot!(tiny(REDUCER_FILE), @r#"
    import * as AST from "./ast";

    export interface Reducer<State> {
      reduceBlock(node: AST.Block, state: { items: Array<State>; default: State | null }): State;
      reduceLiteral(node: AST.Literal): State;
      reduceNegate(node: AST.Negate, state: { operand: State }): State;
    }
    "#);
}

#[test]
fn reconstructing_reducer_widens_to_max_super() {
    insta::assert_snapshot!(tiny(RECONSTRUCTING_REDUCER_FILE), @r#"
    import * as AST from "./ast";
    import type { Reducer } from "./reducer";

    export class ReconstructingReducer implements Reducer<AST.Node> {
      reduceBlock(node: AST.Block, state: { items: Array<AST.Node>; default: AST.Node | null }): AST.Block {
        return new AST.Block(state.items as Array<AST.Expression>, state.default as AST.Expression | null);
      }

      reduceLiteral(node: AST.Literal): AST.Expression {
        return new AST.Literal(node.value);
      }

      reduceNegate(node: AST.Negate, state: { operand: AST.Node }): AST.Expression {
        return new AST.Negate(state.operand as AST.Expression);
      }
    }
    "#);
}

#[test]
fn reconstructing_reducer_on_fixture() {
    let files = Generator::default().render(&mini_schema());
    let out = file(&files, RECONSTRUCTING_REDUCER_FILE);
    assert!(out.contains("reduceBinaryExpression(node: AST.BinaryExpression, state: { left: AST.Node; right: AST.Node }): AST.Expression {"));
    assert!(out.contains("reduceScript(node: AST.Script, state: { statements: Array<AST.Node> }): AST.Script {"));
    assert!(out.contains("return new AST.Script(node.directives, state.statements as Array<AST.Statement>);"));
    assert!(out.contains("): AST.SpreadElementExpression {"));
    assert!(out.contains("reduceBindingIdentifier(node: AST.BindingIdentifier): AST.BindingIdentifier {"));
}

#[test]
fn monoidal_fold_rules() {
    let out = tiny(MONOIDAL_REDUCER_FILE);
    assert!(out.contains("export interface Monoid<T> {"));
    assert!(out.contains("export class MonoidalReducer<State> implements Reducer<State> {"));
    assert!(out.contains("    return this.append(this.fold(state.items), this.present(state.default));\n"));
    assert!(out.contains("  reduceLiteral(node: AST.Literal): State {\n    return this.identity();\n  }\n"));
    assert!(out.contains("    return state.operand;\n"));
}

#[test]
fn monoidal_fold_on_fixture() {
    let files = Generator::default().render(&mini_schema());
    let out = file(&files, MONOIDAL_REDUCER_FILE);
    assert!(out.contains("return this.fold(state.statements);"));
    assert!(out.contains(
        "return this.append(this.append(state.test, state.consequent), this.present(state.alternate));"
    ));
    assert!(out.contains(
        "return this.append(this.fold(state.params), state.body === null ? this.identity() : this.fold(state.body));"
    ));
    assert!(out.contains("return this.fold(state.arguments, state.callee);"));
}

#[test]
fn flattener_and_range_checker() {
    let flattener = tiny(FLATTENER_FILE);
    assert!(flattener.contains("import { reduce } from \"./director\";"));
    assert!(flattener.contains("export class Flattener extends MonoidalReducer<Array<AST.Node>> {"));
    assert!(flattener.contains(
        "  override reduceNegate(node: AST.Negate, state: { operand: Array<AST.Node> }): Array<AST.Node> {\n    return [node, ...super.reduceNegate(node, state)];\n  }\n"
    ));
    assert!(flattener.contains("return [node, ...super.reduceLiteral(node)];"));
    assert!(flattener.contains("export function flatten(node: AST.Node): Array<AST.Node> {"));

    let ranges = tiny(RANGE_CHECKER_FILE);
    assert!(ranges.contains("export class RangeChecker extends MonoidalReducer<Range | null> {"));
    assert!(ranges.contains("private enclose(node: AST.Node, children: Range | null): Range | null {"));
    assert!(ranges.contains("return this.enclose(node, super.reduceBlock(node, state));"));
    assert!(ranges.contains("export function checkRanges(node: AST.Node, locate: Locate): void {"));
}

#[test]
fn serializer_entries() {
    let out = tiny(SERIALIZER_FILE);
    assert!(out.contains(&indented(indoc! {r#"
        case "Block":
          return {
            type: "Block",
            items: node.items.map((e0) => serialize(e0)),
            default: node.default === null ? null : serialize(node.default),
          };
    "#}, 2)));
    assert!(out.contains("        value: node.value,\n"));
}

#[test]
fn deserializer_decoders() {
    let out = tiny(DESERIALIZER_FILE);
    assert!(out.contains("export class DeserializeError extends Error {"));
    assert!(out.contains(&indented(indoc! {r#"
        case "Block":
          return new AST.Block(
            decodeListExpression(field(object, kind, "items")),
            decodeMaybeExpression(field(object, kind, "default")),
          );
    "#}, 2)));
    assert!(out.contains(indoc! {r#"
        function decodeExpression(json: Json): AST.Expression {
          const node = deserialize(json);
          switch (node.type) {
            case "Literal":
            case "Negate":
              return node;
          }
          throw new DeserializeError(`expected Expression, found ${node.type}`);
        }
    "#}));
    assert!(out.contains("function decodeDouble(json: Json): number {\n  if (typeof json !== \"number\") {"));
    assert!(out.contains("return expectArray(json).map((element) => decodeExpression(element));"));
}

#[test]
fn deserializer_checks_enum_tokens() {
    let files = Generator::default().render(&mini_schema());
    let out = file(&files, DESERIALIZER_FILE);
    assert!(out.contains(indoc! {r#"
        function decodeBinaryOperator(json: Json): AST.BinaryOperator {
          switch (json) {
            case "==":
            case "+":
            case "-":
            case "*":
              return json;
          }
          throw new DeserializeError(`unknown BinaryOperator token ${JSON.stringify(json)}`);
        }
    "#}));
}

#[test]
fn path_accessors() {
    let out = tiny(AST_PATH_FILE);
    assert!(out.contains("export abstract class Branch<T> {\n  abstract apply(node: AST.Node): T | undefined;"));
    assert!(out.contains(indoc! {r#"
        export class Block_items extends IndexedBranch<AST.Expression> {
          apply(node: AST.Node): AST.Expression | undefined {
            if (node.type !== "Block") {
              return undefined;
            }
            const list = node.items;
            return list[this.index];
          }

          propertyName(): string {
            return `items[${this.index}]`;
          }
        }
    "#}));
    assert!(out.contains("export class Block_default extends Branch<AST.Expression> {"));
    assert!(out.contains("    return node.default ?? undefined;\n"));
    assert!(out.contains("export class Literal_value extends Branch<number> {"));
    assert!(out.contains("    return \"operand\";\n"));
}

#[test]
fn optional_list_accessor() {
    let files = Generator::default().render(&mini_schema());
    let out = file(&files, AST_PATH_FILE);
    assert!(out.contains("export class ArrowExpression_body extends IndexedBranch<AST.Statement> {"));
    assert!(out.contains("return list === null ? undefined : list[this.index];"));
    assert!(out.contains(
        "export class ArrayExpression_elements extends IndexedBranch<AST.SpreadElementExpression> {"
    ));
    assert!(out.contains("    return list[this.index] ?? undefined;\n"));
}

#[test]
fn file_set() {
    let files = render_with(TINY, TINY_ORDER, Config::new());
    insta::assert_debug_snapshot!(names(&files), @r#"
    [
        "ast.ts",
        "director.ts",
        "reducer.ts",
        "monoidal-reducer.ts",
        "reconstructing-reducer.ts",
        "flattener.ts",
        "range-checker.ts",
        "serializer.ts",
        "deserializer.ts",
        "ast-path.ts",
    ]
    "#);

    let thunked = render_with(TINY, TINY_ORDER, Config::new().thunked(true));
    assert_eq!(thunked.len(), 12);
    assert_eq!(names(&thunked)[10..], [THUNKED_DIRECTOR_FILE, THUNKED_REDUCER_FILE]);
}

#[test]
fn thunked_files() {
    let files = render_with(TINY, TINY_ORDER, Config::new().header(None).thunked(true));
    let director = file(&files, THUNKED_DIRECTOR_FILE);
    assert!(director.contains("import type { ThunkedReducer } from \"./thunked-reducer\";"));
    assert!(director.contains("    items: () => reduceListExpression(reducer, node.items),\n"));
    assert!(director.contains("    operand: () => reduceExpression(reducer, node.operand),\n"));

    insta::assert_snapshot!(file(&files, THUNKED_REDUCER_FILE), @r#"
    import * as AST from "./ast";

    export interface ThunkedReducer<State> {
      reduceBlock(node: AST.Block, state: { items: () => Array<State>; default: () => State | null }): State;
      reduceLiteral(node: AST.Literal): State;
      reduceNegate(node: AST.Negate, state: { operand: () => State }): State;
    }
    "#);
}

#[test]
fn header_and_trailing_newline() {
    let files = render_with(TINY, TINY_ORDER, Config::new());
    for f in &files {
        assert!(
            f.contents.starts_with(&format!("// {DEFAULT_HEADER}\n\n")),
            "{}",
            f.name
        );
        assert!(f.contents.ends_with("}\n") || f.contents.ends_with(";\n"), "{}", f.name);
        assert!(!f.contents.ends_with("\n\n"), "{}", f.name);
    }

    let custom = render_with(TINY, TINY_ORDER, Config::new().header(Some("custom".into())));
    assert!(file(&custom, AST_FILE).starts_with("// custom\n\nexport type Node"));
}

#[test]
fn unexported_declarations() {
    let files = render_with(TINY, TINY_ORDER, Config::new().header(None).export(false));
    let ast = file(&files, AST_FILE);
    assert!(ast.starts_with("type Node = Expression | Block;"));
    assert!(ast.contains("\nclass Literal {"));
    assert!(!ast.contains("export "));

    let ranges = file(&files, RANGE_CHECKER_FILE);
    assert!(ranges.contains("\ninterface Range {"));
    assert!(ranges.contains("\nclass RangeCheckError extends Error {"));
}

#[test]
fn any_node_alias_when_node_is_undeclared() {
    let grammar = indoc! {"
        interface Statement { };
        interface Pass : Statement { };
        interface Label { attribute DOMString name; };
    "};
    let order = "[Label]\nname\n";
    let ast = file(&render_with(grammar, order, Config::new().header(None)), AST_FILE);
    insta::assert_snapshot!(ast, @r#"
    export type Node = Label | Pass;

    export type Statement = Pass;

    /** Implements `Statement`. */
    export class Pass {
      readonly type = "Pass" as const;
    }

    export class Label {
      readonly type = "Label" as const;
      name: string;

      constructor(name: string) {
        this.name = name;
      }
    }
    "#);
}

#[test]
fn enums_become_literal_unions() {
    let files = Generator::default().render(&mini_schema());
    let ast = file(&files, AST_FILE);
    assert!(ast.contains("export type BinaryOperator = \"==\" | \"+\" | \"-\" | \"*\";"));
    assert!(ast.contains("export type VariableDeclarationKind = \"var\" | \"let\" | \"const\";"));
    assert!(ast.contains("export type BindingBindingWithDefault = Binding | BindingWithDefault;"));
    assert!(ast.contains("/** Extends `Function`; implements `Statement`. */\nexport class FunctionDeclaration {"));
}

#[test]
fn rendering_is_deterministic() {
    let first = Generator::default().render(&mini_schema());
    let second = Generator::default().render(&mini_schema());
    assert_eq!(first, second);
}
