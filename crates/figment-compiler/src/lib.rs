//! Figment compiler: GraphQL schema and operation documents to figments.
//!
//! This crate provides the compilation pipeline:
//! - `source` - document registry and the recursive file reader
//! - `syntax` - grammar parsing (via `apollo-parser`) and CST helpers
//! - `directives` - the recognized directive vocabulary
//! - `schema` - grouping, extension merging and classification of schema nodes
//! - `operations` - fragment resolution and query/mutation translation
//! - `synthetic` - built-in definitions appended to every parse
//! - `diagnostics` - error reporting
//! - `builder` - the high-level `FigmentBuilder` facade
//!
//! ```
//! use figment_compiler::FigmentBuilder;
//!
//! let figments = FigmentBuilder::new()
//!     .schema("schema.graphqls", "type Query { widget(id: ID!): Widget } type Widget { id: ID! }")
//!     .operation("widget.graphql", "query GetWidget($id: ID!) { widget(id: $id) { id } }")
//!     .parse()
//!     .expect("valid documents");
//!
//! assert!(figments.find("GetWidget").is_some());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod directives;
pub mod dump;
pub mod operations;
pub mod schema;
pub mod source;
pub mod syntax;
pub mod synthetic;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
pub mod test_utils;

use std::path::{Path, PathBuf};

pub use builder::{FigmentBuilder, Figments};
pub use config::Config;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use source::reader::{FileEnumerator, FsEnumerator, SourceReader};
pub use source::{DocumentKind, Location, SourceId, SourceMap, Span};

/// Errors that abort a parse. No partial IR is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("syntax error in `{path}`: {}", .diagnostics.summary())]
    SyntaxError {
        path: String,
        diagnostics: Diagnostics,
    },

    #[error("schema collection failed: {}", .0.summary())]
    SchemaError(Diagnostics),

    #[error("operation collection failed: {}", .0.summary())]
    OperationError(Diagnostics),

    /// Warnings raised while `Config::strict` is set.
    #[error("strict mode rejected {} warnings: {}", .0.warning_count(), .0.summary())]
    StrictWarnings(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Io { .. } | Error::Config(_) => None,
            Error::SyntaxError { diagnostics, .. } => Some(diagnostics),
            Error::SchemaError(d) | Error::OperationError(d) | Error::StrictWarnings(d) => Some(d),
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Read every document under `root` and compile it.
pub fn parse_dir(root: &Path, config: Config) -> Result<Figments> {
    let sources = SourceReader::new(&config).read(root)?;
    FigmentBuilder::from_sources(sources)
        .with_config(config)
        .parse()
}
