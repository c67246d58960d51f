//! `serializer.ts` and `deserializer.ts`.
//!
//! A node serializes to a JSON object whose `type` member names its kind,
//! followed by one member per attribute in table order. The deserializer
//! accepts exactly that shape and rejects everything else with a
//! `DeserializeError`.

use astgen_core::{Primitive, SemanticType};

use super::naming::{Scope, primitive_type, quote, value_type};
use super::{Config, Emitter};
use crate::plan::{CodecPlan, DecoderBody};
use crate::resolve::DISCRIMINATOR;

const JSON_TYPE: &str =
    "export type Json = null | boolean | number | string | Array<Json> | { [key: string]: Json };";

pub(super) fn render_serializer(plan: &CodecPlan, config: &Config) -> String {
    let any = Scope::Qualified.name(&plan.any_node);
    let mut e = Emitter::new(config);
    e.import_ast();
    e.blank();
    e.block(JSON_TYPE);
    e.blank();

    e.open(format!(
        "{}function serialize(node: {any}): Json {{",
        e.export()
    ));
    e.open("switch (node.type) {");
    for leaf in &plan.leaves {
        e.line(format!("case {}:", quote(&leaf.node)));
        e.indent();
        if leaf.entries.is_empty() {
            e.line(format!("return {{ {DISCRIMINATOR}: {} }};", quote(&leaf.node)));
        } else {
            e.open("return {");
            e.line(format!("{DISCRIMINATOR}: {},", quote(&leaf.node)));
            for entry in &leaf.entries {
                let value = encode(&format!("node.{}", entry.attribute), &entry.ty, 0);
                e.line(format!("{}: {value},", entry.attribute));
            }
            e.close("};");
        }
        e.dedent();
    }
    e.close("}");
    e.line("throw new Error(\"Not reached\");");
    e.close("}");

    e.finish()
}

/// JSON expression for `value` of type `ty`. Values without nodes are
/// already JSON.
fn encode(value: &str, ty: &SemanticType, depth: usize) -> String {
    if !ty.is_stateful() {
        return value.to_owned();
    }
    match ty {
        SemanticType::Node(_) => format!("serialize({value})"),
        SemanticType::Nullable(inner) => {
            format!("{value} === null ? null : {}", encode(value, inner, depth))
        }
        SemanticType::List(inner) => {
            let element = format!("e{depth}");
            format!(
                "{value}.map(({element}) => {})",
                encode(&element, inner, depth + 1)
            )
        }
        _ => value.to_owned(),
    }
}

const DESERIALIZE_PRELUDE: &str = r#"export class DeserializeError extends Error {
  constructor(message: string) {
    super(message);
    this.name = "DeserializeError";
  }
}

function describe(json: Json): string {
  if (json === null) {
    return "null";
  }
  return Array.isArray(json) ? "array" : typeof json;
}

function expectObject(json: Json): { [key: string]: Json } {
  if (json === null || typeof json !== "object" || Array.isArray(json)) {
    throw new DeserializeError(`expected a node object, found ${describe(json)}`);
  }
  return json;
}

function expectArray(json: Json): Array<Json> {
  if (!Array.isArray(json)) {
    throw new DeserializeError(`expected an array, found ${describe(json)}`);
  }
  return json;
}

function field(object: { [key: string]: Json }, kind: string, name: string): Json {
  if (!Object.prototype.hasOwnProperty.call(object, name)) {
    throw new DeserializeError(`${kind} is missing field \`${name}\``);
  }
  return object[name];
}"#;

pub(super) fn render_deserializer(plan: &CodecPlan, config: &Config) -> String {
    let any = Scope::Qualified.name(&plan.any_node);
    let mut e = Emitter::new(config);
    e.import_ast();
    e.line("import type { Json } from \"./serializer\";");
    e.blank();
    e.block(DESERIALIZE_PRELUDE);
    e.blank();

    e.open(format!(
        "{}function deserialize(json: Json): {any} {{",
        e.export()
    ));
    e.line("const object = expectObject(json);");
    e.line(format!(
        "const kind = field(object, \"node\", {});",
        quote(DISCRIMINATOR)
    ));
    e.open("switch (kind) {");
    for leaf in &plan.leaves {
        e.line(format!("case {}:", quote(&leaf.node)));
        e.indent();
        if leaf.entries.is_empty() {
            e.line(format!("return new AST.{}();", leaf.node));
        } else {
            e.open(format!("return new AST.{}(", leaf.node));
            for entry in &leaf.entries {
                e.line(format!(
                    "{}(field(object, kind, {})),",
                    entry.decoder,
                    quote(&entry.attribute)
                ));
            }
            e.close(");");
        }
        e.dedent();
    }
    e.close("}");
    e.line("throw new DeserializeError(`unknown node type ${JSON.stringify(kind)}`);");
    e.close("}");

    for decoder in &plan.decoders {
        e.blank();
        e.open(format!(
            "function {}(json: Json): {} {{",
            decoder.name,
            value_type(&decoder.shape, Scope::Qualified)
        ));
        match &decoder.body {
            DecoderBody::Node { node, leaves } => {
                e.line("const node = deserialize(json);");
                e.open("switch (node.type) {");
                for leaf in leaves {
                    e.line(format!("case {}:", quote(leaf)));
                }
                if !leaves.is_empty() {
                    e.indent();
                    e.line("return node;");
                    e.dedent();
                }
                e.close("}");
                e.line(format!(
                    "throw new DeserializeError(`expected {node}, found ${{node.type}}`);"
                ));
            }
            DecoderBody::Enum { name, values } => {
                e.open("switch (json) {");
                for value in values {
                    e.line(format!("case {}:", quote(value)));
                }
                if !values.is_empty() {
                    e.indent();
                    e.line("return json;");
                    e.dedent();
                }
                e.close("}");
                e.line(format!(
                    "throw new DeserializeError(`unknown {name} token ${{JSON.stringify(json)}}`);"
                ));
            }
            DecoderBody::Value(primitive) => {
                let ty = primitive_type(*primitive);
                e.open(format!("if (typeof json !== \"{ty}\") {{"));
                e.line(format!(
                    "throw new DeserializeError(`expected {}, found ${{describe(json)}}`);",
                    article(*primitive)
                ));
                e.close("}");
                e.line("return json;");
            }
            DecoderBody::Maybe { inner } => {
                e.line(format!("return json === null ? null : {inner}(json);"));
            }
            DecoderBody::List { inner } => {
                e.line(format!("return expectArray(json).map((element) => {inner}(element));"));
            }
        }
        e.close("}");
    }

    e.finish()
}

fn article(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "a string",
        Primitive::Boolean => "a boolean",
        Primitive::Double => "a number",
    }
}
