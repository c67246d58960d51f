//! `director.ts` and `thunked-director.ts`: per-shape dispatch functions.

use super::naming::{Scope, quote, result_type, value_type};
use super::{Config, Emitter};
use crate::plan::{DirectorPlan, DispatchBody, DispatchCase, DispatchMethod, director::ENTRY_METHOD};

pub(super) fn render(plan: &DirectorPlan, config: &Config) -> String {
    let (reducer, module) = reducer_interface(plan);
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line(format!("import type {{ {reducer} }} from \"./{module}\";"));
    e.blank();

    for method in &plan.methods {
        dispatch_method(&mut e, plan, method);
        e.blank();
    }

    let any = Scope::Qualified.name(&plan.any_node);
    e.open(format!(
        "{}function {ENTRY_METHOD}<State>(reducer: {reducer}<State>, node: {any}): State {{",
        e.export()
    ));
    switch(&mut e, &plan.entry);
    e.close("}");

    e.finish()
}

/// Reducer interface the director calls into, and the file declaring it.
pub(super) fn reducer_interface(plan: &DirectorPlan) -> (&'static str, &'static str) {
    if plan.thunked {
        ("ThunkedReducer", "thunked-reducer")
    } else {
        ("Reducer", "reducer")
    }
}

fn dispatch_method(e: &mut Emitter<'_>, plan: &DirectorPlan, method: &DispatchMethod) {
    let (reducer, _) = reducer_interface(plan);
    e.open(format!(
        "{}function {}<State>(reducer: {reducer}<State>, node: {}): {} {{",
        e.export(),
        method.name,
        value_type(&method.shape, Scope::Qualified),
        result_type(&method.shape, "State"),
    ));

    match &method.body {
        DispatchBody::Interface { cases } => switch(e, cases),
        DispatchBody::Leaf { args, .. } if args.is_empty() => {
            e.line(format!("return reducer.{}(node);", method.name));
        }
        DispatchBody::Leaf { args, .. } => {
            e.open(format!("return reducer.{}(node, {{", method.name));
            for arg in args {
                let call = format!("{}(reducer, node.{})", arg.method, arg.attribute);
                if plan.thunked {
                    e.line(format!("{}: () => {call},", arg.attribute));
                } else {
                    e.line(format!("{}: {call},", arg.attribute));
                }
            }
            e.close("});");
        }
        DispatchBody::Maybe { inner } => {
            e.line(format!("return node === null ? null : {inner}(reducer, node);"));
        }
        DispatchBody::List { inner } => {
            e.line(format!("return node.map((element) => {inner}(reducer, element));"));
        }
    }
    e.close("}");
}

fn switch(e: &mut Emitter<'_>, cases: &[DispatchCase]) {
    e.open("switch (node.type) {");
    for case in cases {
        for leaf in &case.leaves {
            e.line(format!("case {}:", quote(leaf)));
        }
        e.indent();
        e.line(format!("return {}(reducer, node);", case.method));
        e.dedent();
    }
    e.close("}");
    e.line("throw new Error(\"Not reached\");");
}
