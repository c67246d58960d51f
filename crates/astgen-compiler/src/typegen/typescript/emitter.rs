//! Line-oriented output buffer shared by the per-file renderers.

use super::Config;

const INDENT: &str = "  ";

/// TypeScript source writer for one output file.
pub struct Emitter<'a> {
    pub(super) config: &'a Config,
    /// Current indentation depth
    depth: usize,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Emitter<'a> {
    /// Start a file, writing the banner when one is configured.
    pub fn new(config: &'a Config) -> Self {
        let mut emitter = Self {
            config,
            depth: 0,
            output: String::new(),
        };
        if let Some(header) = &config.header {
            emitter.line(format!("// {header}"));
            emitter.blank();
        }
        emitter
    }

    /// `export ` when declarations are exported.
    pub(super) fn export(&self) -> &'static str {
        if self.config.export { "export " } else { "" }
    }

    pub(super) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub(super) fn blank(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(super) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write `text` and indent what follows.
    pub(super) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent();
    }

    /// Dedent, then write `text`.
    pub(super) fn close(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
    }

    /// Write a fixed multi-line block, honoring the export setting.
    pub(super) fn block(&mut self, text: &str) {
        for line in text.lines() {
            match line.strip_prefix("export ") {
                Some(rest) if !self.config.export => self.line(rest),
                _ => self.line(line),
            }
        }
    }

    pub(super) fn import_ast(&mut self) {
        self.line("import * as AST from \"./ast\";");
    }

    pub fn finish(mut self) -> String {
        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }
}
