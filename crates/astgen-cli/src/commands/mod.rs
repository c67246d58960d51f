pub mod check;
pub mod dump;
pub mod generate;
pub mod input_loader;


use std::path::PathBuf;

use astgen_compiler::config::DEFAULT_KNOWN_ENUMS;
use astgen_compiler::{Analysis, Config, Generator};

use input_loader::{Inputs, load_inputs};

/// Inputs and analysis options shared by every command.
pub struct AnalysisArgs {
    pub grammar_path: PathBuf,
    pub order_path: PathBuf,
    /// Recognized in addition to the built-in enum set.
    pub enums: Vec<String>,
    /// Replaces the default category table when non-empty.
    pub categories: Vec<String>,
    pub root: Option<String>,
    pub color: bool,
}

impl AnalysisArgs {
    pub fn config(&self) -> Config {
        let enums = DEFAULT_KNOWN_ENUMS
            .iter()
            .map(|s| s.to_string())
            .chain(self.enums.iter().cloned());
        let mut config = Config::new().known_enums(enums);
        if !self.categories.is_empty() {
            config = config.categories(self.categories.iter().cloned());
        }
        if let Some(root) = &self.root {
            config = config.root(root.clone());
        }
        config
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Input(String),

    /// Diagnostics already rendered against their sources.
    #[error("{0}")]
    Diagnostics(String),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    pub fn report(&self) {
        match self {
            CommandError::Diagnostics(rendered) => eprint!("{rendered}"),
            other => eprintln!("error: {other}"),
        }
    }
}

/// Print the error and exit with status 1.
pub fn exit_on_error<T>(result: Result<T, CommandError>) -> T {
    result.unwrap_or_else(|err| {
        err.report();
        std::process::exit(1);
    })
}

/// Load inputs and run analysis; errors come back rendered.
pub fn analyze(args: &AnalysisArgs, generator: &Generator) -> Result<(Inputs, Analysis), CommandError> {
    let inputs = load_inputs(&args.grammar_path, &args.order_path).map_err(CommandError::Input)?;
    match generator.analyze(&inputs.sources, inputs.grammar, inputs.order) {
        Ok(analysis) => Ok((inputs, analysis)),
        Err(err) => {
            let rendered = err.diagnostics().render_colored(&inputs.sources, args.color);
            Err(CommandError::Diagnostics(rendered))
        }
    }
}
