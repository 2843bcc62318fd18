//! The `FigmentBuilder` facade: documents in, figments out.
//!
//! A parse runs in fixed stages, each aborting the whole invocation on
//! error: syntax → schema collection → operation collection → synthesis.

use figment_core::{DefinitionData, DefinitionKind};

use crate::diagnostics::Diagnostics;
use crate::dump::DumpPrinter;
use crate::operations::collect_operations;
use crate::schema::collect_schema;
use crate::source::SourceMap;
use crate::synthetic::synthesize;
use crate::syntax::parse_sources;
use crate::{Config, Error, Result};

/// Collects documents and configuration for one parse invocation.
#[derive(Debug, Clone, Default)]
pub struct FigmentBuilder {
    sources: SourceMap,
    config: Config,
}

impl FigmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from documents already registered, e.g. by a
    /// [`SourceReader`](crate::SourceReader).
    pub fn from_sources(sources: SourceMap) -> Self {
        Self {
            sources,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add a schema document.
    pub fn schema(mut self, path: &str, content: &str) -> Self {
        self.sources.add_schema(path, content);
        self
    }

    /// Add an operation document.
    pub fn operation(mut self, path: &str, content: &str) -> Self {
        self.sources.add_operation(path, content);
        self
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn parse(self) -> Result<Figments> {
        let parsed = parse_sources(&self.sources)?;

        let mut warnings = Diagnostics::new();
        let schema = collect_schema(&parsed, &self.sources, &self.config, &mut warnings)?;
        let operations =
            collect_operations(&parsed, &self.sources, &schema, &self.config, &mut warnings)?;

        if self.config.is_strict() && !warnings.is_empty() {
            return Err(Error::StrictWarnings(warnings));
        }

        let mut definitions = schema.definitions;
        definitions.extend(schema.remotes.into_iter().map(DefinitionData::Remote));
        definitions.extend(operations);
        definitions.extend(synthesize(self.config.default_remote_name()));

        tracing::debug!(
            definitions = definitions.len(),
            warnings = warnings.len(),
            "emitted figments"
        );

        Ok(Figments {
            definitions,
            warnings,
            sources: self.sources,
        })
    }
}

/// The finished, read-only result of one parse.
#[derive(Debug, Clone)]
pub struct Figments {
    definitions: Vec<DefinitionData>,
    warnings: Diagnostics,
    sources: SourceMap,
}

impl Figments {
    /// Schema definitions, remotes, operations, then built-ins.
    pub fn definitions(&self) -> &[DefinitionData] {
        &self.definitions
    }

    pub fn into_definitions(self) -> Vec<DefinitionData> {
        self.definitions
    }

    /// Recoverable conditions met during the parse.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// First definition with the given name, of any kind.
    pub fn find(&self, name: &str) -> Option<&DefinitionData> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    pub fn find_kind(&self, kind: DefinitionKind, name: &str) -> Option<&DefinitionData> {
        self.definitions
            .iter()
            .find(|d| d.kind() == kind && d.name() == name)
    }

    pub fn printer(&self) -> DumpPrinter<'_> {
        DumpPrinter::new(&self.definitions)
    }

    pub fn dump(&self) -> String {
        self.printer().dump()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        figment_core::to_json(&self.definitions)
    }
}
