use std::fs;
use std::path::{Path, PathBuf};

use astgen_compiler::typegen::typescript;
use astgen_compiler::{GeneratedFile, Generator};

use super::{AnalysisArgs, CommandError, analyze, exit_on_error};

pub struct GenerateArgs {
    pub analysis: AnalysisArgs,
    pub output_dir: PathBuf,
    pub thunked: bool,
    pub export: bool,
}

pub fn run(args: GenerateArgs) {
    let written = exit_on_error(execute(&args));
    tracing::debug!(files = written.len(), dir = %args.output_dir.display(), "generation finished");
}

/// Analyze, render every file, then write them. Nothing is written unless
/// analysis succeeds.
pub fn execute(args: &GenerateArgs) -> Result<Vec<PathBuf>, CommandError> {
    let generator = Generator::new(args.analysis.config()).typescript(
        typescript::Config::new()
            .export(args.export)
            .thunked(args.thunked),
    );
    let (inputs, analysis) = analyze(&args.analysis, &generator)?;
    if analysis.warnings.has_warnings() {
        eprint!(
            "{}",
            analysis
                .warnings
                .render_colored(&inputs.sources, args.analysis.color)
        );
    }

    let files = generator.render(&analysis.schema);
    write_files(&args.output_dir, &files)
}

/// Write every file or none.
///
/// Files are staged in a temporary directory inside `dir`, then moved into
/// place. A failed move takes back the files this run already placed, and a
/// `dir` this run created is removed again.
fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, CommandError> {
    let created = !dir.exists();
    let result = stage_and_promote(dir, files);
    if result.is_err() && created {
        let _ = fs::remove_dir_all(dir);
    }
    result
}

fn stage_and_promote(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, CommandError> {
    let write_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| CommandError::Write { path, source }
    };

    fs::create_dir_all(dir).map_err(write_error(dir))?;
    let staging = tempfile::Builder::new()
        .prefix(".astgen-")
        .tempdir_in(dir)
        .map_err(write_error(dir))?;
    for file in files {
        let path = staging.path().join(&file.name);
        fs::write(&path, &file.contents).map_err(write_error(&path))?;
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        if let Err(source) = fs::rename(staging.path().join(&file.name), &path) {
            for placed in &written {
                let _ = fs::remove_file(placed);
            }
            return Err(CommandError::Write { path, source });
        }
        tracing::debug!(path = %path.display(), "wrote file");
        written.push(path);
    }
    Ok(written)
}
