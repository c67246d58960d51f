use astgen_core::TextRange;

use crate::SourceId;

/// Diagnostic kinds, grouped by the stage that reports them.
///
/// Declaration order is also report order when several diagnostics share a
/// span: syntax first, then configuration, then graph shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Grammar syntax
    UnclosedBlock,
    ExpectedDefinition,
    ExpectedName,
    ExpectedType,
    ExpectedString,
    ExpectedToken,
    UnexpectedToken,

    // Attribute-order table syntax
    OrderFieldOutsideSection,
    OrderEmptySection,
    OrderDuplicateSection,
    OrderDuplicateField,

    // Declarations
    Redefinition,
    UnknownType,
    UnknownParent,
    UnknownEnum,
    DuplicateEnumValue,
    InheritanceCycle,
    TypedefCycle,
    MultipleConcreteParents,

    // Type shapes
    UnsupportedTypeShape,
    UnionMemberNotSimple,
    UnionMemberNotNode,

    // Order table against the graph
    MissingAttributeOrder,
    AttributeNotInOrder,
    OrderNamesUnknownAttribute,
    OrderForUnknownType,

    // Derived facts
    AmbiguousMaxSuper,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::OrderForUnknownType | Self::AmbiguousMaxSuper => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message, used when no custom detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBlock => "missing closing `}`",
            Self::ExpectedDefinition => "expected `interface`, `typedef`, `enum` or `implements`",
            Self::ExpectedName => "expected a name",
            Self::ExpectedType => "expected a type",
            Self::ExpectedString => "expected a string literal",
            Self::ExpectedToken => "expected token",
            Self::UnexpectedToken => "unexpected token",

            Self::OrderFieldOutsideSection => "field name before any `[Type]` header",
            Self::OrderEmptySection => "empty section header",
            Self::OrderDuplicateSection => "section is already defined",
            Self::OrderDuplicateField => "field is listed twice",

            Self::Redefinition => "name is already defined",
            Self::UnknownType => "unknown type",
            Self::UnknownParent => "unknown parent interface",
            Self::UnknownEnum => "enum is not in the recognized set",
            Self::DuplicateEnumValue => "duplicate enum value",
            Self::InheritanceCycle => "inheritance cycle",
            Self::TypedefCycle => "typedef refers to itself",
            Self::MultipleConcreteParents => "node extends more than one class",

            Self::UnsupportedTypeShape => "unsupported type shape",
            Self::UnionMemberNotSimple => "union members must be plain names",
            Self::UnionMemberNotNode => "union members must be node types",

            Self::MissingAttributeOrder => "no attribute order for node",
            Self::AttributeNotInOrder => "attribute missing from the order table",
            Self::OrderNamesUnknownAttribute => "order table names an attribute the node lacks",
            Self::OrderForUnknownType => "order table names an unknown type",

            Self::AmbiguousMaxSuper => "ambiguous max-super",
        }
    }

    /// Template for custom messages. `{}` is replaced with the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::Redefinition => "`{}` is already defined".to_string(),
            Self::UnknownType => "unknown type `{}`".to_string(),
            Self::UnknownParent => "unknown parent interface `{}`".to_string(),
            Self::UnknownEnum => "enum `{}` is not in the recognized set".to_string(),
            Self::DuplicateEnumValue => "duplicate enum value `{}`".to_string(),
            Self::MultipleConcreteParents => "`{}` extends more than one class".to_string(),
            Self::MissingAttributeOrder => "no attribute order for node `{}`".to_string(),
            Self::ExpectedToken => "expected {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) source: SourceId,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    /// Related spans, always in the same source.
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> Self {
        Self {
            kind,
            source,
            range,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.range.start,
            self.range.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.range.start, related.range.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
