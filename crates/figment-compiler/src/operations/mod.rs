//! Operation Collector.
//!
//! Fragments of every operation document are harvested first, so an
//! operation may spread a fragment from any document of the batch. Each
//! named query then becomes a thing and each mutation an action, carrying
//! the wire text sent to the remote.

pub mod fragments;
pub mod translate;
pub mod wire;

#[cfg(test)]
mod wire_tests;

use figment_core::DefinitionData;

use crate::diagnostics::Diagnostics;
use crate::schema::SchemaCollection;
use crate::source::{DocumentKind, SourceMap};
use crate::syntax::{DocumentContext, ParsedDocument};
use crate::{Config, Error, Result};

use fragments::FragmentTable;
use translate::Translator;

/// Translate every operation of the batch, in source order.
///
/// Recoverable problems are appended to `warnings`; any error aborts with
/// [`Error::OperationError`].
pub fn collect_operations(
    parsed: &[ParsedDocument],
    sources: &SourceMap,
    schema: &SchemaCollection,
    config: &Config,
    warnings: &mut Diagnostics,
) -> Result<Vec<DefinitionData>> {
    let mut diagnostics = Diagnostics::new();
    let table = FragmentTable::harvest(parsed, sources, &mut diagnostics);
    let mut translator = Translator::new(schema, &table, config.default_remote_name());

    let mut definitions = Vec::new();
    for doc in parsed.iter().filter(|d| d.kind == DocumentKind::Operation) {
        let ctx = DocumentContext::new(sources, doc.id);
        definitions.extend(translator.translate_document(doc, &ctx, &mut diagnostics));
    }

    if diagnostics.has_errors() {
        return Err(Error::OperationError(diagnostics));
    }

    tracing::debug!(
        operations = definitions.len(),
        warnings = diagnostics.warning_count(),
        "translated operations"
    );
    warnings.extend(diagnostics);
    Ok(definitions)
}
