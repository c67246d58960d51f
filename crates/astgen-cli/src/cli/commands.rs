//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.
//! Analysis options (`--enum`, `--category`, `--root`) apply to every
//! command, so `check` and `dump` see the same graph `generate` would.

use clap::Command;

use super::args::*;

fn with_analysis_args(cmd: Command) -> Command {
    cmd.arg(grammar_path_arg())
        .arg(order_path_arg())
        .arg(enum_arg())
        .arg(category_arg())
        .arg(root_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("astgen")
        .about("AST code generator for WebIDL-style grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Generate every output file into a directory.
pub fn generate_command() -> Command {
    let cmd = Command::new("generate")
        .about("Generate AST classes, director, reducers, codec and paths")
        .override_usage("  astgen generate <GRAMMAR> --order <FILE> -o <DIR>")
        .after_help(
            r#"EXAMPLES:
  astgen generate es.webidl --order es.order -o src/ast
  astgen generate es.webidl --order es.order -o out --thunked
  cat es.webidl | astgen generate - --order es.order -o out"#,
        );

    with_analysis_args(cmd)
        .arg(output_dir_arg())
        .arg(thunked_arg())
        .arg(no_export_arg())
}

/// Validate a grammar and its attribute order.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar and its attribute order")
        .override_usage("  astgen check <GRAMMAR> --order <FILE> [--strict]")
        .after_help(
            r#"EXAMPLES:
  astgen check es.webidl --order es.order            # errors only
  astgen check es.webidl --order es.order --strict   # warnings fail too"#,
        );

    with_analysis_args(cmd).arg(strict_arg())
}

/// Print the normalized node graph.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the normalized node graph")
        .override_usage("  astgen dump <GRAMMAR> --order <FILE> [--facts]")
        .after_help(
            r#"EXAMPLES:
  astgen dump es.webidl --order es.order
  astgen dump es.webidl --order es.order --facts --color never"#,
        );

    with_analysis_args(cmd).arg(facts_arg())
}
