//! `ast-path.ts`: one branch class per (leaf, attribute).

use super::naming::{Scope, quote, value_type};
use super::{Config, Emitter};
use crate::plan::PathPlan;

const BRANCH: &str = r#"export abstract class Branch<T> {
  abstract apply(node: AST.NODE): T | undefined;

  abstract propertyName(): string;

  equals(other: Branch<unknown>): boolean {
    return this.constructor === other.constructor;
  }
}

export abstract class IndexedBranch<T> extends Branch<T> {
  constructor(readonly index: number) {
    super();
  }

  override equals(other: Branch<unknown>): boolean {
    return super.equals(other) && other instanceof IndexedBranch && other.index === this.index;
  }
}"#;

pub(super) fn render(plan: &PathPlan, any_node: &str, config: &Config) -> String {
    let any = Scope::Qualified.name(any_node);
    let mut e = Emitter::new(config);
    e.import_ast();
    e.blank();
    e.block(&BRANCH.replace("AST.NODE", &any));

    for accessor in &plan.accessors {
        e.blank();
        let element = value_type(&accessor.element, Scope::Qualified);
        let base = if accessor.indexed { "IndexedBranch" } else { "Branch" };
        e.open(format!(
            "{}class {} extends {base}<{element}> {{",
            e.export(),
            accessor.name
        ));

        e.open(format!("apply(node: {any}): {element} | undefined {{"));
        e.open(format!("if (node.type !== {}) {{", quote(&accessor.leaf)));
        e.line("return undefined;");
        e.close("}");
        // Null reads as absent, like a foreign kind or a missing index.
        let absent = if accessor.optional { " ?? undefined" } else { "" };
        if accessor.indexed {
            e.line(format!("const list = node.{};", accessor.attribute));
            if accessor.nullable {
                e.line(format!(
                    "return list === null ? undefined : list[this.index]{absent};"
                ));
            } else {
                e.line(format!("return list[this.index]{absent};"));
            }
        } else {
            e.line(format!("return node.{}{absent};", accessor.attribute));
        }
        e.close("}");
        e.blank();

        e.open("propertyName(): string {");
        if accessor.indexed {
            e.line(format!("return `{}[${{this.index}}]`;", accessor.attribute));
        } else {
            e.line(format!("return {};", quote(&accessor.attribute)));
        }
        e.close("}");
        e.close("}");
    }

    e.finish()
}
