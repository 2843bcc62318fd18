//! Schema Definition Collector.
//!
//! Pipeline over all schema documents of a batch:
//! 1. `ingest` - CST to typed nodes, directives read once
//! 2. `remote` - remotes merged across documents
//! 3. `grouping` - nodes grouped by name in first-seen order
//! 4. `merge` - extensions folded into their primary
//! 5. `classify` - nodes to IR definitions, with type renames applied

pub mod classify;
pub mod grouping;
pub mod ingest;
pub mod merge;
pub mod remote;
pub mod type_ref;

#[cfg(test)]
mod tests;

use figment_core::builtins::{QUERY_TYPE, is_reserved_name};
use figment_core::{ActionData, DefinitionData, DefinitionKind, FieldData, RemoteData, ThingData};
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::{DocumentKind, Location, SourceMap};
use crate::syntax::{DocumentContext, ParsedDocument};
use crate::{Config, Error, Result};

use classify::{Renames, classify_base_action, classify_mutation, classify_type};
use grouping::{Group, group_documents};
use ingest::{TypeKind, TypeNode, ingest_document};
use merge::merge_group;
use remote::RemoteTable;

/// Canonical schema definitions, plus the lookups operations need.
#[derive(Debug, Clone, Default)]
pub struct SchemaCollection {
    /// In grouping order.
    pub definitions: Vec<DefinitionData>,
    pub remotes: Vec<RemoteData>,
    query: Option<usize>,
    /// Declared Mutation field name → action index.
    mutations: IndexMap<String, usize>,
    renames: Renames,
}

impl SchemaCollection {
    /// The thing built from the primary Query type.
    pub fn query(&self) -> Option<&ThingData> {
        self.query
            .and_then(|idx| self.definitions.get(idx))
            .and_then(DefinitionData::as_thing)
    }

    /// A Query field by the name operations select it with.
    pub fn query_field(&self, name: &str) -> Option<&FieldData> {
        let query = self.query()?;
        let remote = query.properties.remote_name().unwrap_or_default();
        query
            .properties
            .fields
            .iter()
            .find(|f| f.alias_for(remote).unwrap_or(&f.name) == name)
    }

    /// The action built from a Mutation field, by declared field name.
    pub fn mutation(&self, name: &str) -> Option<&ActionData> {
        self.mutations
            .get(name)
            .and_then(|idx| self.definitions.get(*idx))
            .and_then(DefinitionData::as_action)
    }

    /// Type renames, for operation variables referencing schema types.
    pub fn renames(&self) -> &Renames {
        &self.renames
    }

    pub fn contains(&self, kind: DefinitionKind, name: &str) -> bool {
        self.definitions
            .iter()
            .any(|d| d.kind() == kind && d.name() == name)
    }
}

enum Pending {
    Type(TypeNode),
    Mutation(grouping::MutationField),
    BaseAction(ingest::BaseActionNode),
}

/// Collect every schema document of the batch.
///
/// Recoverable problems are appended to `warnings`; any error aborts with
/// [`Error::SchemaError`].
pub fn collect_schema(
    parsed: &[ParsedDocument],
    sources: &SourceMap,
    config: &Config,
    warnings: &mut Diagnostics,
) -> Result<SchemaCollection> {
    let mut diagnostics = Diagnostics::new();
    let default_remote = config.default_remote_name();

    let documents: Vec<_> = parsed
        .iter()
        .filter(|doc| doc.kind == DocumentKind::Schema)
        .map(|doc| {
            let ctx = DocumentContext::new(sources, doc.id);
            ingest_document(doc, &ctx, default_remote, &mut diagnostics)
        })
        .collect();

    let remotes = RemoteTable::collect(&documents, default_remote, &mut diagnostics);
    let groups = group_documents(documents, &mut diagnostics);
    let mutation_defaults = groups.mutation_defaults;

    let mut pending = Vec::with_capacity(groups.entries.len());
    for (_, group) in groups.entries {
        match group {
            Group::Type(group) => {
                if let Some(node) = merge_group(group, &mut diagnostics) {
                    pending.push(Pending::Type(node));
                }
            }
            Group::Mutation(field) => pending.push(Pending::Mutation(field)),
            Group::BaseAction(base_action) => pending.push(Pending::BaseAction(base_action)),
        }
    }

    let renames = Renames::collect(pending.iter().filter_map(|p| match p {
        Pending::Type(node) => Some(node),
        _ => None,
    }));

    let mut collection = SchemaCollection::default();
    let mut locations = Vec::with_capacity(pending.len());
    for item in pending {
        let idx = collection.definitions.len();
        let (definition, location) = match item {
            Pending::Type(node) => {
                if node.kind == TypeKind::Object && node.name == QUERY_TYPE {
                    collection.query = Some(idx);
                }
                let location = node.location.clone();
                (classify_type(node, &renames), location)
            }
            Pending::Mutation(field) => {
                let location = field.field.location.clone();
                collection.mutations.insert(field.field.name.clone(), idx);
                (
                    DefinitionData::Action(classify_mutation(field, &mutation_defaults, &renames)),
                    location,
                )
            }
            Pending::BaseAction(base_action) => {
                let location = base_action.directive.location.clone();
                let Some(action) = classify_base_action(base_action, &mut diagnostics) else {
                    continue;
                };
                (DefinitionData::Action(action), location)
            }
        };
        collection.definitions.push(definition);
        locations.push(location);
    }

    check_names(&collection.definitions, &locations, &mut diagnostics);
    collection.remotes = remotes.into_definitions();
    collection.renames = renames;

    if diagnostics.has_errors() {
        return Err(Error::SchemaError(diagnostics));
    }

    tracing::debug!(
        definitions = collection.definitions.len(),
        remotes = collection.remotes.len(),
        warnings = diagnostics.warning_count(),
        "collected schema"
    );
    warnings.extend(diagnostics);
    Ok(collection)
}

/// Final names, after renames, must be unique per kind and must not shadow
/// built-ins.
fn check_names(definitions: &[DefinitionData], locations: &[Location], diagnostics: &mut Diagnostics) {
    let mut seen: IndexMap<(DefinitionKind, &str), &Location> = IndexMap::new();

    for (definition, location) in definitions.iter().zip(locations) {
        let name = definition.name();
        if is_reserved_name(name) {
            diagnostics
                .report(DiagnosticKind::ReservedName, location.clone())
                .message(name)
                .emit();
            continue;
        }
        match seen.entry((definition.kind(), name)) {
            Entry::Vacant(slot) => {
                slot.insert(location);
            }
            Entry::Occupied(slot) => {
                diagnostics
                    .report(DiagnosticKind::DuplicateDefinition, location.clone())
                    .message(name)
                    .related_to("first defined here", (*slot.get()).clone())
                    .emit();
            }
        }
    }
}
