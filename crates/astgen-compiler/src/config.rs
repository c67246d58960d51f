//! Generator configuration.

/// Enum names the grammar may declare.
pub const DEFAULT_KNOWN_ENUMS: &[&str] = &[
    "BinaryOperator",
    "CompoundAssignmentOperator",
    "UnaryOperator",
    "UpdateOperator",
    "VariableDeclarationKind",
];

/// Canonical categories, highest priority first. Breaks max-super ties.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Expression",
    "Statement",
    "Binding",
    "AssignmentTarget",
    "SimpleAssignmentTarget",
    "AssignmentTargetAssignmentTargetWithDefault",
    "BindingBindingWithDefault",
    "VariableDeclarationAssignmentTarget",
    "PropertyName",
    "ObjectProperty",
    "MethodDefinition",
    "ImportDeclaration",
    "ExportDeclaration",
    "AssignmentTargetProperty",
    "BindingProperty",
];

/// Root node seeding the director when present in the grammar.
pub const DEFAULT_ROOT: &str = "Program";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) known_enums: Vec<String>,
    pub(crate) categories: Vec<String>,
    pub(crate) root: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            known_enums: DEFAULT_KNOWN_ENUMS.iter().map(|s| s.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            root: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the recognized enum set.
    pub fn known_enums<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.known_enums = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the canonical-category priority table.
    pub fn categories<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.categories = names.into_iter().map(Into::into).collect();
        self
    }

    /// Seed the director from this node instead of the default root.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    pub fn is_known_enum(&self, name: &str) -> bool {
        self.known_enums.iter().any(|e| e == name)
    }

    pub fn category_position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    /// Explicit root, or the default one.
    pub fn root_name(&self) -> &str {
        self.root.as_deref().unwrap_or(DEFAULT_ROOT)
    }
}
