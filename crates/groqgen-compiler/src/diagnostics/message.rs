use rowan::TextRange;

/// Diagnostic kinds, errors first.
///
/// Errors mark a schema the generator cannot work with. Warnings mark source the
/// parser skipped or degraded; generation still proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // The schema cannot be turned into queries
    MissingTypeName,
    NoFields,

    // Structure the scanner had to guess around
    UnclosedDelimiter,
    MismatchedDelimiter,
    UnrecognizedInput,

    // Declarations that were skipped or collapsed
    IncompleteField,
    DuplicateNestedField,
    EmptyObjectArray,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::MissingTypeName | Self::NoFields => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Default hint for this kind, attached to every diagnostic of the kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingTypeName => Some("declare the document type, e.g. `name: 'post'`"),
            Self::NoFields => Some("declare fields with `defineField({ name: ..., type: ... })`"),
            Self::EmptyObjectArray => Some("the field is projected as a plain array"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::MissingTypeName => "schema has no type name",
            Self::NoFields => "schema declares no fields",
            Self::UnclosedDelimiter => "unclosed delimiter",
            Self::MismatchedDelimiter => "unexpected closing delimiter",
            Self::UnrecognizedInput => "unrecognized input",
            Self::IncompleteField => "field declaration needs both `name` and `type`",
            Self::DuplicateNestedField => "duplicate nested field",
            Self::EmptyObjectArray => "object array has no nested fields",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnclosedDelimiter => "unclosed `{}`".to_string(),
            Self::MismatchedDelimiter => "unexpected `{}`".to_string(),
            Self::DuplicateNestedField => {
                "nested field `{}` is declared more than once".to_string()
            }
            Self::EmptyObjectArray => "object array `{}` has no nested fields".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
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
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
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
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
