use std::fs;
use std::io::{self, Read};
use std::path::Path;

use astgen_compiler::{SourceId, SourceMap};

/// Grammar and order sources registered in one map.
pub struct Inputs {
    pub sources: SourceMap,
    pub grammar: SourceId,
    pub order: SourceId,
}

/// Read the grammar (`-` for stdin) and the order file.
pub fn load_inputs(grammar_path: &Path, order_path: &Path) -> Result<Inputs, String> {
    let mut sources = SourceMap::new();
    let grammar = if grammar_path.as_os_str() == "-" {
        let content = read_stdin()?;
        sources.add_stdin(&content)
    } else {
        let content = read_file(grammar_path)?;
        sources.add_file(&grammar_path.to_string_lossy(), &content)
    };
    let order = sources.add_file(&order_path.to_string_lossy(), &read_file(order_path)?);
    tracing::debug!(
        grammar = %grammar_path.display(),
        order = %order_path.display(),
        "loaded inputs"
    );
    Ok(Inputs {
        sources,
        grammar,
        order,
    })
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
