//! TypeScript rendering of the emission plans.
//!
//! One file per emitter; every file but `ast.ts` reaches node types through
//! `import * as AST from "./ast"`.

mod ast;
mod codec;
mod config;
mod director;
mod emitter;
mod naming;
mod path;
mod reducers;

#[cfg(test)]
mod typescript_tests;

pub use config::{Config, DEFAULT_HEADER};
use emitter::Emitter;

use crate::GeneratedFile;
use crate::plan::Plans;

pub const AST_FILE: &str = "ast.ts";
pub const DIRECTOR_FILE: &str = "director.ts";
pub const REDUCER_FILE: &str = "reducer.ts";
pub const MONOIDAL_REDUCER_FILE: &str = "monoidal-reducer.ts";
pub const RECONSTRUCTING_REDUCER_FILE: &str = "reconstructing-reducer.ts";
pub const FLATTENER_FILE: &str = "flattener.ts";
pub const RANGE_CHECKER_FILE: &str = "range-checker.ts";
pub const SERIALIZER_FILE: &str = "serializer.ts";
pub const DESERIALIZER_FILE: &str = "deserializer.ts";
pub const AST_PATH_FILE: &str = "ast-path.ts";
pub const THUNKED_DIRECTOR_FILE: &str = "thunked-director.ts";
pub const THUNKED_REDUCER_FILE: &str = "thunked-reducer.ts";

/// Render every output file, in a fixed order.
pub fn render_all(plans: &Plans, config: &Config) -> Vec<GeneratedFile> {
    let file = |name: &str, contents: String| GeneratedFile {
        name: name.to_owned(),
        contents,
    };

    let mut files = vec![
        file(AST_FILE, ast::render(&plans.data, config)),
        file(DIRECTOR_FILE, director::render(&plans.director, config)),
        file(
            REDUCER_FILE,
            reducers::render_interface(&plans.reducers, config, false),
        ),
        file(
            MONOIDAL_REDUCER_FILE,
            reducers::render_monoidal(&plans.reducers, config),
        ),
        file(
            RECONSTRUCTING_REDUCER_FILE,
            reducers::render_reconstructing(&plans.reducers, config),
        ),
        file(
            FLATTENER_FILE,
            reducers::render_flattener(&plans.reducers, config),
        ),
        file(
            RANGE_CHECKER_FILE,
            reducers::render_range_checker(&plans.reducers, config),
        ),
        file(SERIALIZER_FILE, codec::render_serializer(&plans.codec, config)),
        file(
            DESERIALIZER_FILE,
            codec::render_deserializer(&plans.codec, config),
        ),
        file(
            AST_PATH_FILE,
            path::render(&plans.paths, &plans.data.any_node, config),
        ),
    ];

    if config.thunked {
        files.push(file(
            THUNKED_DIRECTOR_FILE,
            director::render(&plans.director.to_thunked(), config),
        ));
        files.push(file(
            THUNKED_REDUCER_FILE,
            reducers::render_interface(&plans.reducers, config, true),
        ));
    }

    tracing::trace!(files = files.len(), thunked = config.thunked, "rendered typescript");
    files
}
