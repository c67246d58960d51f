//! The reducer family: plain and thunked interfaces, the monoidal base class,
//! the reconstructing reducer and the two monoidal reducers built on it.

use astgen_core::{FoldForm, FoldPlan};

use super::naming::{Scope, result_type, value_type};
use super::{Config, Emitter};
use crate::plan::{LeafReducer, ReducerPlan, StateParam};

/// `reducer.ts` or `thunked-reducer.ts`.
pub(super) fn render_interface(plan: &ReducerPlan, config: &Config, thunked: bool) -> String {
    let name = if thunked { "ThunkedReducer" } else { "Reducer" };
    let mut e = Emitter::new(config);
    e.import_ast();
    e.blank();

    e.open(format!("{}interface {name}<State> {{", e.export()));
    for leaf in &plan.leaves {
        e.line(format!("{};", signature(leaf, "State", "State", thunked)));
    }
    e.close("}");

    e.finish()
}

const MONOID: &str = r#"export interface Monoid<T> {
  empty(): T;
  concat(left: T, right: T): T;
}"#;

const MONOIDAL_HELPERS: &str = r#"constructor(protected readonly monoid: Monoid<State>) {}

protected identity(): State {
  return this.monoid.empty();
}

protected append(left: State, right: State): State {
  return this.monoid.concat(left, right);
}

protected present(value: State | null): State {
  return value === null ? this.identity() : value;
}

protected fold(values: Array<State | null>, seed: State = this.identity()): State {
  return values.reduce<State>((acc, value) => this.append(acc, this.present(value)), seed);
}"#;

/// `monoidal-reducer.ts`.
pub(super) fn render_monoidal(plan: &ReducerPlan, config: &Config) -> String {
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line("import type { Reducer } from \"./reducer\";");
    e.blank();
    e.block(MONOID);
    e.blank();

    e.open(format!(
        "{}class MonoidalReducer<State> implements Reducer<State> {{",
        e.export()
    ));
    e.block(MONOIDAL_HELPERS);
    for leaf in &plan.leaves {
        e.blank();
        e.open(format!("{} {{", signature(leaf, "State", "State", false)));
        e.line(format!("return {};", fold_expression(leaf)));
        e.close("}");
    }
    e.close("}");

    e.finish()
}

fn fold_expression(leaf: &LeafReducer) -> String {
    let param = |index: usize| fold_param(&leaf.params[index]);
    match &leaf.fold {
        FoldPlan::Identity => "this.identity()".to_owned(),
        FoldPlan::Single { index } => param(*index),
        FoldPlan::Fold1 { seed, list } => {
            format!("this.fold(state.{}, {})", leaf.params[*list].attribute, param(*seed))
        }
        FoldPlan::Append { indices } => {
            let mut parts = indices.iter().map(|&i| param(i));
            let first = parts.next().unwrap_or_else(|| "this.identity()".to_owned());
            parts.fold(first, |acc, next| format!("this.append({acc}, {next})"))
        }
    }
}

fn fold_param(param: &StateParam) -> String {
    let value = format!("state.{}", param.attribute);
    match param.form {
        FoldForm::Plain => value,
        FoldForm::Optional => format!("this.present({value})"),
        FoldForm::List | FoldForm::ListOfOptional => format!("this.fold({value})"),
        FoldForm::OptionalList => format!("{value} === null ? this.identity() : this.fold({value})"),
    }
}

/// `reconstructing-reducer.ts`.
pub(super) fn render_reconstructing(plan: &ReducerPlan, config: &Config) -> String {
    let any = Scope::Qualified.name(&plan.any_node);
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line("import type { Reducer } from \"./reducer\";");
    e.blank();

    e.open(format!(
        "{}class ReconstructingReducer implements Reducer<{any}> {{",
        e.export()
    ));
    for (i, leaf) in plan.leaves.iter().enumerate() {
        if i > 0 {
            e.blank();
        }
        let returns = Scope::Qualified.name(&leaf.returns);
        e.open(format!("{} {{", signature(leaf, &any, &returns, false)));
        let args = leaf
            .attributes
            .iter()
            .map(|field| {
                if field.ty.is_stateful() {
                    format!(
                        "state.{} as {}",
                        field.name,
                        value_type(&field.ty, Scope::Qualified)
                    )
                } else {
                    format!("node.{}", field.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        e.line(format!("return new AST.{}({args});", leaf.node));
        e.close("}");
    }
    e.close("}");

    e.finish()
}

/// `flattener.ts`: every node in pre-order.
pub(super) fn render_flattener(plan: &ReducerPlan, config: &Config) -> String {
    let any = Scope::Qualified.name(&plan.any_node);
    let nodes = format!("Array<{any}>");
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line("import { reduce } from \"./director\";");
    e.line("import { type Monoid, MonoidalReducer } from \"./monoidal-reducer\";");
    e.blank();

    e.open(format!("const NODES: Monoid<{nodes}> = {{"));
    e.line("empty: () => [],");
    e.line("concat: (left, right) => left.concat(right),");
    e.close("};");
    e.blank();

    e.open(format!(
        "{}class Flattener extends MonoidalReducer<{nodes}> {{",
        e.export()
    ));
    e.open("constructor() {");
    e.line("super(NODES);");
    e.close("}");
    for leaf in &plan.leaves {
        e.blank();
        e.open(format!("override {} {{", signature(leaf, &nodes, &nodes, false)));
        e.line(format!("return [node, ...super.{}];", super_call(leaf)));
        e.close("}");
    }
    e.close("}");
    e.blank();

    e.open(format!(
        "{}function flatten(node: {any}): {nodes} {{",
        e.export()
    ));
    e.line("return reduce(new Flattener(), node);");
    e.close("}");

    e.finish()
}

const RANGE_PRELUDE: &str = r#"export interface Range {
  start: number;
  end: number;
}

export class RangeCheckError extends Error {
  constructor(message: string) {
    super(message);
    this.name = "RangeCheckError";
  }
}

/** Siblings must appear in order and must not overlap. */
const EXTENT: Monoid<Range | null> = {
  empty: () => null,
  concat: (left, right) => {
    if (left === null) {
      return right;
    }
    if (right === null) {
      return left;
    }
    if (right.start < left.end) {
      throw new RangeCheckError(
        `sibling ranges [${left.start}, ${left.end}] and [${right.start}, ${right.end}] overlap`,
      );
    }
    return { start: left.start, end: right.end };
  },
};"#;

const ENCLOSE: &str = r#"private enclose(node: AST.NODE, children: Range | null): Range | null {
  const range = this.locate(node);
  if (range === null) {
    return children;
  }
  if (children !== null && (children.start < range.start || children.end > range.end)) {
    throw new RangeCheckError(
      `${node.type} [${range.start}, ${range.end}] does not contain [${children.start}, ${children.end}]`,
    );
  }
  return range;
}"#;

/// `range-checker.ts`: children nest inside their parent's range.
pub(super) fn render_range_checker(plan: &ReducerPlan, config: &Config) -> String {
    let any = Scope::Qualified.name(&plan.any_node);
    let state = "Range | null";
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line("import { reduce } from \"./director\";");
    e.line("import { type Monoid, MonoidalReducer } from \"./monoidal-reducer\";");
    e.blank();
    e.block(RANGE_PRELUDE);
    e.blank();
    e.line(format!(
        "{}type Locate = (node: {any}) => Range | null;",
        e.export()
    ));
    e.blank();

    e.open(format!(
        "{}class RangeChecker extends MonoidalReducer<{state}> {{",
        e.export()
    ));
    e.open("constructor(private readonly locate: Locate) {");
    e.line("super(EXTENT);");
    e.close("}");
    e.blank();
    e.block(&ENCLOSE.replace("AST.NODE", &any));
    for leaf in &plan.leaves {
        e.blank();
        e.open(format!("override {} {{", signature(leaf, state, state, false)));
        e.line(format!("return this.enclose(node, super.{});", super_call(leaf)));
        e.close("}");
    }
    e.close("}");
    e.blank();

    e.open(format!(
        "{}function checkRanges(node: {any}, locate: Locate): void {{",
        e.export()
    ));
    e.line("reduce(new RangeChecker(locate), node);");
    e.close("}");

    e.finish()
}

/// `reduceX(node: AST.X, state: { .. }): R`, without a trailing `;` or body.
fn signature(leaf: &LeafReducer, state: &str, returns: &str, thunked: bool) -> String {
    let node = Scope::Qualified.name(&leaf.node);
    if leaf.params.is_empty() {
        return format!("{}(node: {node}): {returns}", leaf.method);
    }
    let fields = leaf
        .params
        .iter()
        .map(|p| {
            let ty = result_type(&p.ty, state);
            if thunked {
                format!("{}: () => {ty}", p.attribute)
            } else {
                format!("{}: {ty}", p.attribute)
            }
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("{}(node: {node}, state: {{ {fields} }}): {returns}", leaf.method)
}

fn super_call(leaf: &LeafReducer) -> String {
    if leaf.params.is_empty() {
        format!("{}(node)", leaf.method)
    } else {
        format!("{}(node, state)", leaf.method)
    }
}
