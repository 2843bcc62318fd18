//! Remotes declared across schema documents.

use figment_core::{EndpointFlagData, RemoteData};
use indexmap::IndexMap;
use indexmap::map::Entry;

use super::ingest::SchemaDocument;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directives::RemoteDirective;
use crate::source::Location;

#[derive(Debug, Clone)]
struct RemoteEntry {
    address: Option<String>,
    address_location: Location,
    base_action: Option<(String, Location)>,
    location: Location,
}

/// Remotes by name. Several documents may declare the same remote as long
/// as they agree on its address and base action.
#[derive(Debug, Default)]
pub struct RemoteTable {
    entries: IndexMap<String, RemoteEntry>,
}

impl RemoteTable {
    pub fn collect(
        documents: &[SchemaDocument],
        default_remote: &str,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut table = Self::default();
        for document in documents {
            let Some(remote) = &document.remote else {
                continue;
            };
            if remote.name == default_remote {
                diagnostics
                    .report(DiagnosticKind::ReservedName, remote.location.clone())
                    .message(remote.name.as_str())
                    .emit();
                continue;
            }
            table.declare(remote, diagnostics);
            for base_action in &document.base_actions {
                table.set_base_action(
                    &remote.name,
                    &base_action.directive.name,
                    &base_action.directive.location,
                    diagnostics,
                );
            }
        }
        table
    }

    fn declare(&mut self, remote: &RemoteDirective, diagnostics: &mut Diagnostics) {
        match self.entries.entry(remote.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(RemoteEntry {
                    address: remote.address.clone(),
                    address_location: remote.location.clone(),
                    base_action: None,
                    location: remote.location.clone(),
                });
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                match (&entry.address, &remote.address) {
                    (Some(first), Some(second)) if first != second => {
                        diagnostics
                            .report(DiagnosticKind::ConflictingRemote, remote.location.clone())
                            .message(format!(
                                "`{}` is `{}` here and `{}` elsewhere",
                                remote.name, second, first
                            ))
                            .related_to("first address", entry.address_location.clone())
                            .emit();
                    }
                    _ => {}
                }
                if entry.address.is_none() && remote.address.is_some() {
                    entry.address = remote.address.clone();
                    entry.address_location = remote.location.clone();
                }
            }
        }
    }

    fn set_base_action(
        &mut self,
        remote: &str,
        name: &str,
        location: &Location,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(entry) = self.entries.get_mut(remote) else {
            return;
        };
        if let Some((first, first_location)) = &entry.base_action {
            if first != name {
                diagnostics
                    .report(DiagnosticKind::ConflictingRemote, location.clone())
                    .message(format!(
                        "`{}` already has base action `{}`, not `{}`",
                        remote, first, name
                    ))
                    .related_to("first base action", first_location.clone())
                    .emit();
            }
            return;
        }
        entry.base_action = Some((name.to_string(), location.clone()));
    }

    pub fn into_definitions(self) -> Vec<RemoteData> {
        self.entries
            .into_iter()
            .map(|(name, entry)| RemoteData {
                name,
                endpoint: entry.address.map(|address| EndpointFlagData { address }),
                base_action: entry.base_action.map(|(name, _)| name),
                builtin: false,
                source: entry.location.source,
            })
            .collect()
    }
}
