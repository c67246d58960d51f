//! Configuration types for TypeScript emission.

/// Banner written at the top of every file unless replaced.
pub const DEFAULT_HEADER: &str = "Generated by astgen. Do not edit.";

/// Configuration for TypeScript emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Whether to export declarations
    pub(crate) export: bool,
    /// Whether to also emit the thunked director and reducer
    pub(crate) thunked: bool,
    /// Banner comment prepended to every file
    pub(crate) header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            thunked: false,
            header: Some(DEFAULT_HEADER.to_owned()),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to export declarations.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// Set whether to emit `thunked-director.ts` and `thunked-reducer.ts`.
    pub fn thunked(mut self, value: bool) -> Self {
        self.thunked = value;
        self
    }

    /// Replace the banner line, or drop it with `None`.
    pub fn header(mut self, value: Option<String>) -> Self {
        self.header = value;
        self
    }
}
