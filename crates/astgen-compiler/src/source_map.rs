//! Source storage for a generation run.
//!
//! A run reads two sources (the grammar and the attribute-order table);
//! diagnostics refer to them by `SourceId`.

/// Lightweight handle to a source in a run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceId(pub(crate) u32);

/// Describes the origin of a source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// Text passed directly (tests, embedding).
    Inline,
    /// Input read from stdin.
    Stdin,
    /// A file with its path.
    File(String),
}

impl SourceKind {
    /// Returns the display name for diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::Inline => "<input>",
            SourceKind::Stdin => "<stdin>",
            SourceKind::File(path) => path,
        }
    }
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

/// Registry of all sources.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_inline(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Inline, content)
    }

    pub fn add_stdin(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Stdin, content)
    }

    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::File(path.to_owned()), content)
    }

    pub fn content(&self, id: SourceId) -> &str {
        &self.entry(id).content
    }

    pub fn kind(&self, id: SourceId) -> &SourceKind {
        &self.entry(id).kind
    }

    /// File path if this source is a file.
    pub fn path(&self, id: SourceId) -> Option<&str> {
        match &self.entry(id).kind {
            SourceKind::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: SourceId) -> &SourceEntry {
        self.entries
            .get(id.0 as usize)
            .unwrap_or_else(|| panic!("SourceMap: invalid {id:?}"))
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: content.to_owned(),
        });
        id
    }
}
