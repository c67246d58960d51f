use astgen_compiler::Generator;

use super::{AnalysisArgs, CommandError, analyze, exit_on_error};

pub struct CheckArgs {
    pub analysis: AnalysisArgs,
    pub strict: bool,
}

pub fn run(args: CheckArgs) {
    exit_on_error(execute(&args));
    // Silent on success (like cargo check)
}

pub fn execute(args: &CheckArgs) -> Result<(), CommandError> {
    let generator = Generator::new(args.analysis.config());
    let (inputs, analysis) = analyze(&args.analysis, &generator)?;
    if args.strict && analysis.warnings.has_warnings() {
        let rendered = analysis
            .warnings
            .render_colored(&inputs.sources, args.analysis.color);
        return Err(CommandError::Diagnostics(rendered));
    }
    Ok(())
}
