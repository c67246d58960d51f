//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

use super::ColorChoice;

/// Grammar file, or `-` for stdin (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("WebIDL grammar file (- for stdin)")
}

/// Attribute-order file (--order).
pub fn order_path_arg() -> Arg {
    Arg::new("order_path")
        .long("order")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Attribute-order file")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output")
        .value_name("DIR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Directory to write generated files into")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(value_parser!(ColorChoice))
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Also emit the thunked director and reducer (--thunked).
pub fn thunked_arg() -> Arg {
    Arg::new("thunked")
        .long("thunked")
        .action(ArgAction::SetTrue)
        .help("Also emit the thunked director and reducer")
}

/// Don't export declarations (--no-export).
pub fn no_export_arg() -> Arg {
    Arg::new("no_export")
        .long("no-export")
        .action(ArgAction::SetTrue)
        .help("Don't export declarations")
}

/// Additional recognized enum (--enum, repeatable).
pub fn enum_arg() -> Arg {
    Arg::new("enums")
        .long("enum")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Recognize an enum name besides the built-in set")
}

/// Canonical category (--category, repeatable).
pub fn category_arg() -> Arg {
    Arg::new("categories")
        .long("category")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Canonical category for max-super ties, highest priority first (replaces the default table)")
}

/// Director root (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("NAME")
        .help("Node the director is seeded from (default: Program)")
}

/// Include derived facts (--facts).
pub fn facts_arg() -> Arg {
    Arg::new("facts")
        .long("facts")
        .action(ArgAction::SetTrue)
        .help("Include leaf sets and max-super")
}
