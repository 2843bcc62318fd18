//! Compiler configuration.

use figment_core::builtins::DEFAULT_REMOTE;
use serde::Deserialize;

/// Configuration for reading and compiling documents.
///
/// Build tooling usually keeps this next to the schema as JSON:
///
/// ```json
/// { "schema_extensions": ["graphqls"], "operation_extensions": ["graphql"], "strict": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File extensions of schema documents, without the dot
    pub(crate) schema_extensions: Vec<String>,
    /// File extensions of operation documents, without the dot
    pub(crate) operation_extensions: Vec<String>,
    /// Reject recoverable conditions instead of warning
    pub(crate) strict: bool,
    /// Remote owning definitions from documents without `@remote`
    pub(crate) default_remote: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_extensions: vec!["graphqls".to_string()],
            operation_extensions: vec!["graphql".to_string()],
            strict: false,
            default_remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the schema document extensions.
    pub fn schema_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the operation document extensions.
    pub fn operation_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operation_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether warnings abort the parse.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Set the name of the default remote.
    pub fn default_remote(mut self, name: impl Into<String>) -> Self {
        self.default_remote = name.into();
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn default_remote_name(&self) -> &str {
        &self.default_remote
    }

    pub fn schema_extension_list(&self) -> &[String] {
        &self.schema_extensions
    }

    pub fn operation_extension_list(&self) -> &[String] {
        &self.operation_extensions
    }
}
