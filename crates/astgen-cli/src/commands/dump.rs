use astgen_compiler::Generator;
use astgen_core::SchemaPrinter;

use super::{AnalysisArgs, CommandError, analyze, exit_on_error};

pub struct DumpArgs {
    pub analysis: AnalysisArgs,
    pub facts: bool,
}

pub fn run(args: DumpArgs) {
    print!("{}", exit_on_error(execute(&args)));
}

pub fn execute(args: &DumpArgs) -> Result<String, CommandError> {
    let generator = Generator::new(args.analysis.config());
    let (_, analysis) = analyze(&args.analysis, &generator)?;
    Ok(SchemaPrinter::new(&analysis.schema)
        .colored(args.analysis.color)
        .facts(args.facts)
        .render())
}
