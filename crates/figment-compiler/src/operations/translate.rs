//! Queries to things, mutations to actions.

use apollo_parser::cst::{self, CstNode};
use figment_core::builtins::is_reserved_name;
use figment_core::{
    ActionData, AuthFlagData, DefinitionData, DefinitionKind, EndpointFlagData, FieldData,
    PriorityFlagData, RemoteFlagData, ResolvesFlagData, SyncableProperties, ThingData,
    UniqueFlagData,
};
use indexmap::IndexMap;
use indexmap::map::Entry;

use super::fragments::{FragmentResolver, FragmentTable, spreads_in};
use super::wire::{assemble, wire_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directives::{FieldDirectives, TypeDirectives, read_directives};
use crate::schema::SchemaCollection;
use crate::schema::classify::field_data;
use crate::schema::ingest::FieldNode;
use crate::schema::type_ref;
use crate::source::Location;
use crate::syntax::{DocumentContext, ParsedDocument, definition_label, name_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    fn of(op: &cst::OperationDefinition) -> Self {
        match op.operation_type() {
            Some(ty) if ty.mutation_token().is_some() => Self::Mutation,
            Some(ty) if ty.subscription_token().is_some() => Self::Subscription,
            _ => Self::Query,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// What an operation selects at its root.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RootSelection {
    Field {
        /// Alias if given, otherwise the field name.
        key: String,
        name: String,
        location: Location,
    },
    /// A fragment spread or inline fragment.
    Indirect,
    Empty,
    Many(usize),
}

impl RootSelection {
    fn read(op: &cst::OperationDefinition, ctx: &DocumentContext<'_>) -> Self {
        let selections: Vec<cst::Selection> = op
            .selection_set()
            .map(|set| set.selections().collect())
            .unwrap_or_default();

        match selections.as_slice() {
            [] => Self::Empty,
            [cst::Selection::Field(field)] => {
                let Some(name) = name_of(field.name()) else {
                    return Self::Empty;
                };
                Self::Field {
                    key: field
                        .alias()
                        .and_then(|alias| name_of(alias.name()))
                        .unwrap_or_else(|| name.clone()),
                    name,
                    location: ctx.locate(field.syntax()),
                }
            }
            [_] => Self::Indirect,
            many => Self::Many(many.len()),
        }
    }

    fn describe(&self, operation: &str) -> String {
        match self {
            Self::Field { name, .. } => format!("`{}` selects `{}`", operation, name),
            Self::Indirect => format!("`{}` selects its root field through a fragment", operation),
            Self::Empty => format!("`{}` selects nothing", operation),
            Self::Many(count) => format!("`{}` selects {} root fields", operation, count),
        }
    }
}

/// One named query or mutation, with everything read from the CST.
struct Operation {
    name: String,
    kind: OperationKind,
    directives: TypeDirectives,
    root: RootSelection,
    variables: Vec<FieldNode>,
    text: String,
    location: Location,
}

/// Translates every operation of the batch against the collected schema.
pub struct Translator<'a, 't> {
    schema: &'a SchemaCollection,
    resolver: FragmentResolver<'t>,
    default_remote: &'a str,
    names: IndexMap<(DefinitionKind, String), Location>,
}

impl<'a, 't> Translator<'a, 't> {
    pub fn new(schema: &'a SchemaCollection, table: &'t FragmentTable, default_remote: &'a str) -> Self {
        Self {
            schema,
            resolver: FragmentResolver::new(table),
            default_remote,
            names: IndexMap::new(),
        }
    }

    /// Operations of one document, in source order.
    pub fn translate_document(
        &mut self,
        doc: &ParsedDocument,
        ctx: &DocumentContext<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Vec<DefinitionData> {
        let mut out = Vec::new();
        for definition in doc.document.definitions() {
            match &definition {
                cst::Definition::OperationDefinition(op) => {
                    out.extend(self.translate_operation(op, ctx, diagnostics));
                }
                cst::Definition::FragmentDefinition(_) => {}
                other => {
                    diagnostics
                        .report(
                            DiagnosticKind::UnrecognizedDefinition,
                            ctx.locate(other.syntax()),
                        )
                        .message(format!(
                            "{} in operation document `{}`",
                            definition_label(other),
                            ctx.path()
                        ))
                        .emit();
                }
            }
        }
        out
    }

    fn translate_operation(
        &mut self,
        op: &cst::OperationDefinition,
        ctx: &DocumentContext<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<DefinitionData> {
        let location = ctx.locate(op.syntax());
        let kind = OperationKind::of(op);
        let Some(name) = name_of(op.name()) else {
            diagnostics
                .report(DiagnosticKind::AnonymousOperation, location)
                .message(format!("every {} needs a name", kind.label()))
                .emit();
            return None;
        };
        if kind == OperationKind::Subscription {
            diagnostics
                .report(DiagnosticKind::UnrecognizedDefinition, location)
                .message(format!("subscription `{}` has no figment", name))
                .emit();
            return None;
        }

        let spreads = spreads_in(op.syntax(), ctx);
        let fragments = self.resolver.closure(&spreads, diagnostics)?;

        let operation = Operation {
            kind,
            directives: TypeDirectives::read(&read_directives(op.directives(), ctx)),
            root: RootSelection::read(op, ctx),
            variables: variables(op.variable_definitions(), ctx),
            text: assemble(&wire_text(op.syntax()), &fragments),
            location,
            name,
        };

        match operation.kind {
            OperationKind::Query => self.translate_query(operation, diagnostics),
            _ => Some(self.translate_mutation(operation, diagnostics)),
        }
    }

    fn translate_query(
        &mut self,
        op: Operation,
        diagnostics: &mut Diagnostics,
    ) -> Option<DefinitionData> {
        let schema = self.schema;
        let RootSelection::Field {
            key,
            name: field_name,
            location: field_location,
        } = &op.root
        else {
            diagnostics
                .report(DiagnosticKind::QueryRootSelection, op.location.clone())
                .message(op.root.describe(&op.name))
                .emit();
            return None;
        };

        let Some(query_field) = schema.query_field(field_name) else {
            diagnostics
                .report(DiagnosticKind::UndefinedRootField, field_location.clone())
                .message(format!(
                    "query `{}` selects `{}`, which is not declared on Query",
                    op.name, field_name
                ))
                .emit();
            return None;
        };
        let query = schema.query();

        let name = self.register(DefinitionKind::Thing, &op, diagnostics)?;
        let remote = query
            .and_then(|q| q.properties.remote_name())
            .unwrap_or(self.default_remote);
        let unique = if op.directives.unique {
            Some(UniqueFlagData { implicit: false })
        } else if op.variables.is_empty() {
            Some(UniqueFlagData { implicit: true })
        } else {
            None
        };

        // Variables identify the thing unless it is declared unique.
        let identifying = unique.is_none();
        let mut fields: Vec<FieldData> = op
            .variables
            .into_iter()
            .map(|v| {
                let mut field = field_data(v, remote, schema.renames());
                field.identifying = identifying;
                field
            })
            .collect();
        let mut root = FieldData::new(
            key.clone(),
            query_field.field_type.clone(),
            field_location.source.clone(),
        );
        root.root = true;
        root.description = query_field.description.clone();
        fields.push(root);

        let figment = op.directives.figment;
        let mut properties = SyncableProperties::new(op.location.source);
        properties.auth = figment
            .auth
            .map(|auth| AuthFlagData { auth })
            .or_else(|| query.and_then(|q| q.properties.auth.clone()));
        properties.remote = Some(RemoteFlagData {
            remote: remote.to_string(),
        });
        properties.endpoint = figment
            .address
            .map(|address| EndpointFlagData { address })
            .or_else(|| query.and_then(|q| q.properties.endpoint.clone()));
        properties.fields = fields;

        Some(DefinitionData::Thing(ThingData {
            name,
            description: None,
            is_interface: false,
            is_input: false,
            unique,
            query: Some(op.text),
            properties,
        }))
    }

    /// A mutation links to the response type of the schema action it calls,
    /// when that call is unambiguous. Otherwise it is still emitted, unlinked.
    fn translate_mutation(&mut self, op: Operation, diagnostics: &mut Diagnostics) -> DefinitionData {
        let schema = self.schema;
        let linked = match &op.root {
            RootSelection::Field { key, name, .. } => {
                schema.mutation(name).map(|action| (action, key.clone()))
            }
            _ => None,
        };
        if linked.is_none() {
            let reason = match &op.root {
                RootSelection::Field { name, .. } => format!(
                    "`{}` selects `{}`, which is not declared on Mutation",
                    op.name, name
                ),
                other => other.describe(&op.name),
            };
            diagnostics
                .report(DiagnosticKind::UnlinkedMutation, op.location.clone())
                .message(reason)
                .emit();
        }

        let name = self
            .register(DefinitionKind::Action, &op, diagnostics)
            .unwrap_or_else(|| op.name.clone());
        let action = linked.as_ref().map(|(action, _)| *action);
        let remote = action
            .and_then(|a| a.properties.remote_name())
            .unwrap_or(self.default_remote);

        let fields = op
            .variables
            .into_iter()
            .map(|v| field_data(v, remote, schema.renames()))
            .collect();

        let figment = op.directives.figment;
        let mut properties = SyncableProperties::new(op.location.source);
        properties.auth = figment
            .auth
            .map(|auth| AuthFlagData { auth })
            .or_else(|| action.and_then(|a| a.properties.auth.clone()));
        properties.remote = Some(RemoteFlagData {
            remote: remote.to_string(),
        });
        properties.endpoint = figment
            .address
            .map(|address| EndpointFlagData { address })
            .or_else(|| action.and_then(|a| a.properties.endpoint.clone()));
        properties.fields = fields;

        let resolves = linked.and_then(|(action, key)| {
            let linked = action.resolves.as_ref()?;
            Some(ResolvesFlagData {
                field: key,
                field_type: linked.field_type.clone(),
            })
        });

        DefinitionData::Action(ActionData {
            name,
            description: None,
            is_base: false,
            priority: figment
                .priority
                .map(|priority| PriorityFlagData { priority })
                .or_else(|| action.and_then(|a| a.priority.clone())),
            effect: figment
                .effect
                .or_else(|| action.and_then(|a| a.effect.clone())),
            resolves,
            operation: Some(op.text),
            properties,
        })
    }

    /// Claim the operation's final name. `None` when it is taken.
    fn register(
        &mut self,
        kind: DefinitionKind,
        op: &Operation,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let name = op
            .directives
            .figment
            .name
            .clone()
            .unwrap_or_else(|| op.name.clone());

        if is_reserved_name(&name) {
            diagnostics
                .report(DiagnosticKind::ReservedName, op.location.clone())
                .message(name)
                .emit();
            return None;
        }
        if self.schema.contains(kind, &name) {
            diagnostics
                .report(DiagnosticKind::DuplicateDefinition, op.location.clone())
                .message(name)
                .emit();
            return None;
        }
        match self.names.entry((kind, name.clone())) {
            Entry::Vacant(slot) => {
                slot.insert(op.location.clone());
                Some(name)
            }
            Entry::Occupied(slot) => {
                diagnostics
                    .report(DiagnosticKind::DuplicateDefinition, op.location.clone())
                    .message(name)
                    .related_to("first defined here", slot.get().clone())
                    .emit();
                None
            }
        }
    }
}

fn variables(
    definitions: Option<cst::VariableDefinitions>,
    ctx: &DocumentContext<'_>,
) -> Vec<FieldNode> {
    definitions
        .map(|defs| {
            defs.variable_definitions()
                .filter_map(|v| {
                    let directives = read_directives(v.directives(), ctx);
                    Some(FieldNode {
                        name: name_of(v.variable()?.name())?,
                        field_type: type_ref::from_cst(&v.ty()?)?,
                        description: None,
                        directives: FieldDirectives::read(&directives),
                        arguments: Vec::new(),
                        location: ctx.locate(v.syntax()),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
