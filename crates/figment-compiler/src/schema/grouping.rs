//! Order-preserving grouping of schema nodes by name.
//!
//! Built in one pass before any merging: the first sighting of a name fixes
//! its output position, the single primary wins, extensions merge after.

use figment_core::builtins::{MUTATION_TYPE, QUERY_TYPE, is_reserved_name};
use indexmap::IndexMap;
use indexmap::map::Entry;

use super::ingest::{BaseActionNode, FieldNode, SchemaDocument, TypeKind, TypeNode};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directives::FigmentArgs;
use crate::source::Location;

/// Definitions and actions are separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Type,
    Action,
}

/// A type with all of its extensions.
#[derive(Debug, Clone)]
pub struct TypeGroup {
    pub primary: Option<TypeNode>,
    pub extensions: Vec<TypeNode>,
}

/// A field of the Mutation type, which becomes its own action.
#[derive(Debug, Clone)]
pub struct MutationField {
    pub field: FieldNode,
    /// `@figment` of the Mutation node declaring the field.
    pub owner: FigmentArgs,
    pub remote: String,
}

#[derive(Debug, Clone)]
pub enum Group {
    Type(TypeGroup),
    Mutation(MutationField),
    BaseAction(BaseActionNode),
}

impl Group {
    fn primary_location(&self) -> Option<&Location> {
        match self {
            Group::Type(group) => group.primary.as_ref().map(|p| &p.location),
            Group::Mutation(m) => Some(&m.field.location),
            Group::BaseAction(b) => Some(&b.directive.location),
        }
    }
}

#[derive(Debug, Default)]
pub struct Groups {
    pub entries: IndexMap<(Namespace, String), Group>,
    /// `@figment` of the primary Mutation type; fields fall back to its auth.
    pub mutation_defaults: FigmentArgs,
    mutation_primary: Option<Location>,
}

pub fn group_documents(documents: Vec<SchemaDocument>, diagnostics: &mut Diagnostics) -> Groups {
    let mut groups = Groups::default();

    for document in documents {
        for base_action in document.base_actions {
            let name = base_action.directive.name.clone();
            let location = base_action.directive.location.clone();
            if is_reserved_name(&name) {
                diagnostics
                    .report(DiagnosticKind::ReservedName, location)
                    .message(name)
                    .emit();
                continue;
            }
            groups.insert_primary(
                Namespace::Action,
                name,
                location,
                Group::BaseAction(base_action),
                diagnostics,
            );
        }

        for node in document.types {
            groups.add_type(node, diagnostics);
        }
    }

    tracing::debug!(groups = groups.entries.len(), "grouped schema definitions");
    groups
}

impl Groups {
    fn add_type(&mut self, node: TypeNode, diagnostics: &mut Diagnostics) {
        if node.kind == TypeKind::Object && node.name == QUERY_TYPE && node.is_extension {
            diagnostics
                .report(DiagnosticKind::QueryExtension, node.location.clone())
                .message("declare queries on the primary Query type")
                .emit();
            return;
        }

        if node.kind == TypeKind::Object && node.name == MUTATION_TYPE {
            self.add_mutation(node, diagnostics);
            return;
        }

        if node.is_extension {
            let group = self
                .entries
                .entry((Namespace::Type, node.name.clone()))
                .or_insert_with(|| {
                    Group::Type(TypeGroup {
                        primary: None,
                        extensions: Vec::new(),
                    })
                });
            if let Group::Type(group) = group {
                group.extensions.push(node);
            }
            return;
        }

        if is_reserved_name(&node.name) {
            diagnostics
                .report(DiagnosticKind::ReservedName, node.location.clone())
                .message(node.name.as_str())
                .emit();
            return;
        }

        let name = node.name.clone();
        let location = node.location.clone();
        let group = Group::Type(TypeGroup {
            primary: Some(node),
            extensions: Vec::new(),
        });
        self.insert_primary(Namespace::Type, name, location, group, diagnostics);
    }

    /// Every Mutation field is an independently named action, whether it
    /// comes from the primary type or an extension.
    fn add_mutation(&mut self, node: TypeNode, diagnostics: &mut Diagnostics) {
        if !node.is_extension {
            if let Some(first) = &self.mutation_primary {
                diagnostics
                    .report(DiagnosticKind::DuplicateDefinition, node.location.clone())
                    .message(MUTATION_TYPE)
                    .related_to("first defined here", first.clone())
                    .emit();
                return;
            }
            self.mutation_primary = Some(node.location.clone());
            self.mutation_defaults = node.directives.figment.clone();
        }

        for field in node.fields {
            let name = field.name.clone();
            let location = field.location.clone();
            let group = Group::Mutation(MutationField {
                field,
                owner: node.directives.figment.clone(),
                remote: node.remote.clone(),
            });
            self.insert_primary(Namespace::Action, name, location, group, diagnostics);
        }
    }

    fn insert_primary(
        &mut self,
        namespace: Namespace,
        name: String,
        location: Location,
        group: Group,
        diagnostics: &mut Diagnostics,
    ) {
        match self.entries.entry((namespace, name)) {
            Entry::Vacant(slot) => {
                slot.insert(group);
            }
            Entry::Occupied(mut slot) => {
                let name = slot.key().1.clone();
                if let Some(first) = slot.get().primary_location() {
                    diagnostics
                        .report(DiagnosticKind::DuplicateDefinition, location)
                        .message(name)
                        .related_to("first defined here", first.clone())
                        .emit();
                    return;
                }
                // Only extensions so far: the primary takes its place ahead of them.
                if let (Group::Type(existing), Group::Type(new)) = (slot.get_mut(), group) {
                    existing.primary = new.primary;
                }
            }
        }
    }
}
