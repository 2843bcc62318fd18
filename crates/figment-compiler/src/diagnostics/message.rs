use std::fmt;

use figment_core::Source;

use crate::source::{Location, Span};

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Errors abort the parse with no partial IR. Warnings are reported on the
/// finished [`Figments`](crate::Figments) unless strict mode upgrades them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Grammar-level problems reported by the parser
    SyntaxError,

    // Nodes that have no IR meaning in their document
    UnrecognizedDefinition,
    AnonymousOperation,

    // Schema structure
    DuplicateDefinition,
    ReservedName,
    ExtensionWithoutPrimary,
    ExtensionKindMismatch,
    QueryExtension,
    DuplicateField,
    InvalidTypeString,
    ConflictingRemote,

    // Operations
    DuplicateFragment,
    UndefinedFragment,
    FragmentCycle,
    QueryRootSelection,
    UndefinedRootField,

    // Recoverable
    MissingRemoteArguments,
    MissingDirectiveArgument,
    UnknownExtendTarget,
    UnknownEnumOverride,
    OrphanBaseAction,
    UnlinkedMutation,
}

impl DiagnosticKind {
    /// Default severity for this kind. Strict mode treats warnings as errors.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::MissingRemoteArguments
            | Self::MissingDirectiveArgument
            | Self::UnknownExtendTarget
            | Self::UnknownEnumOverride
            | Self::OrphanBaseAction
            | Self::UnlinkedMutation => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::SyntaxError => "syntax error",

            Self::UnrecognizedDefinition => "definition not allowed here",
            Self::AnonymousOperation => "operation must be named",

            Self::DuplicateDefinition => "duplicate definition",
            Self::ReservedName => "name is reserved for a built-in definition",
            Self::ExtensionWithoutPrimary => "extension has no primary definition",
            Self::ExtensionKindMismatch => "extension kind differs from its primary definition",
            Self::QueryExtension => "the Query type cannot be extended",
            Self::DuplicateField => "duplicate field",
            Self::InvalidTypeString => "invalid type string",
            Self::ConflictingRemote => "remote declared with different addresses",

            Self::DuplicateFragment => "duplicate fragment",
            Self::UndefinedFragment => "undefined fragment",
            Self::FragmentCycle => "fragment spreads form a cycle",
            Self::QueryRootSelection => "query must select exactly one root field",
            Self::UndefinedRootField => "root field is not declared on Query",

            Self::MissingRemoteArguments => "`@remote` is missing its `name` argument",
            Self::MissingDirectiveArgument => "directive is missing a required argument",
            Self::UnknownExtendTarget => "`@extend` names an unknown field",
            Self::UnknownEnumOverride => "`@enum_value` names an unknown value",
            Self::OrphanBaseAction => "base action has no remote",
            Self::UnlinkedMutation => "mutation response is not linked to a type",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::ReservedName => "`{}` is reserved for a built-in definition".to_string(),
            Self::ExtensionWithoutPrimary => "`{}` is extended but never defined".to_string(),
            Self::DuplicateField => "field `{}` is already defined".to_string(),
            Self::DuplicateFragment => "fragment `{}` is already defined".to_string(),
            Self::UndefinedFragment => "fragment `{}` is not defined".to_string(),
            Self::UnknownExtendTarget => "`@extend` names unknown field `{}`".to_string(),
            Self::UnknownEnumOverride => "`@enum_value` names unknown value `{}`".to_string(),
            Self::UndefinedRootField => "{}".to_string(),
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

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) location: Location,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &Source {
        &self.location.source
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// Where the problem is, both as a byte span and as path + lines.
    pub(crate) location: Location,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            location,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &Source {
        &self.location.source
    }

    pub fn span(&self) -> Span {
        self.location.span
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.severity, self.location.source, self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {})",
                related.message, related.location.source
            )?;
        }
        Ok(())
    }
}
