//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the fields each command uses
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::AnalysisArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;

/// Inputs and analysis options shared by every command.
pub struct AnalysisParams {
    pub grammar_path: PathBuf,
    pub order_path: PathBuf,
    pub enums: Vec<String>,
    pub categories: Vec<String>,
    pub root: Option<String>,
    pub color: ColorChoice,
}

impl AnalysisParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned().unwrap_or_default(),
            order_path: m.get_one::<PathBuf>("order_path").cloned().unwrap_or_default(),
            enums: get_many(m, "enums"),
            categories: get_many(m, "categories"),
            root: m.get_one::<String>("root").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<AnalysisParams> for AnalysisArgs {
    fn from(p: AnalysisParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            order_path: p.order_path,
            enums: p.enums,
            categories: p.categories,
            root: p.root,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GenerateParams {
    pub analysis: AnalysisParams,
    pub output_dir: PathBuf,
    pub thunked: bool,
    pub no_export: bool,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            analysis: AnalysisParams::from_matches(m),
            output_dir: m.get_one::<PathBuf>("output_dir").cloned().unwrap_or_default(),
            thunked: m.get_flag("thunked"),
            no_export: m.get_flag("no_export"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            analysis: p.analysis.into(),
            output_dir: p.output_dir,
            thunked: p.thunked,
            export: !p.no_export,
        }
    }
}

pub struct CheckParams {
    pub analysis: AnalysisParams,
    pub strict: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            analysis: AnalysisParams::from_matches(m),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            analysis: p.analysis.into(),
            strict: p.strict,
        }
    }
}

pub struct DumpParams {
    pub analysis: AnalysisParams,
    pub facts: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            analysis: AnalysisParams::from_matches(m),
            facts: m.get_flag("facts"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            analysis: p.analysis.into(),
            facts: p.facts,
        }
    }
}

fn get_many(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    m.get_one::<ColorChoice>("color").copied().unwrap_or_default()
}
