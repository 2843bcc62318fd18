//! Merged nodes to IR definitions.

use figment_core::{
    ActionData, AuthFlagData, DefinitionData, EndpointFlagData, EnumData, EnumValueData,
    FieldData, FieldTypeData, PriorityFlagData, RemoteFlagData, Required, ResolvesFlagData,
    SyncableProperties, ThingData, UniqueFlagData, ValueData, VariantData, VarietyData,
};
use indexmap::IndexMap;

use super::grouping::MutationField;
use super::ingest::{BaseActionNode, FieldNode, TypeKind, TypeNode};
use super::type_ref::parse_type_string;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directives::FigmentArgs;

/// Type renames from `@figment(name:)`, applied to every reference.
#[derive(Debug, Clone, Default)]
pub struct Renames {
    map: IndexMap<String, String>,
}

impl Renames {
    pub fn collect<'a>(nodes: impl IntoIterator<Item = &'a TypeNode>) -> Self {
        let map = nodes
            .into_iter()
            .filter_map(|node| {
                let renamed = node.directives.figment.name.as_ref()?;
                Some((node.name.clone(), renamed.clone()))
            })
            .collect();
        Self { map }
    }

    pub fn name<'a>(&'a self, declared: &'a str) -> &'a str {
        self.map.get(declared).map_or(declared, String::as_str)
    }

    pub fn apply(&self, mut ty: FieldTypeData) -> FieldTypeData {
        if let Some(renamed) = self.map.get(ty.definition()) {
            ty.rename_definition(renamed);
        }
        ty
    }
}

/// Convert a field node. A field rename keeps the declared name as the
/// owning remote's alias unless one is given explicitly.
pub fn field_data(node: FieldNode, remote: &str, renames: &Renames) -> FieldData {
    let directives = node.directives;
    let figment = directives.figment;

    let name = figment.name.unwrap_or_else(|| node.name.clone());
    let mut aliases = figment.aliases;
    if name != node.name && !aliases.contains_key(remote) {
        aliases.insert(remote.to_string(), node.name);
    }

    let mut field = FieldData::new(name, renames.apply(node.field_type), node.location.source);
    field.aliases = aliases;
    field.identifying = directives.identifying;
    field.hash_target = directives.hash_target;
    field.local_only = directives.local_only;
    field.root = directives.root;
    field.derives = directives.derives;
    field.deprecated = directives.deprecated.is_some();
    field.deprecation_reason = directives.deprecated.and_then(|d| d.reason);
    field.description = node.description;
    field
}

fn properties(
    remote: &str,
    auth: Option<String>,
    address: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<FieldData>,
    source: figment_core::Source,
) -> SyncableProperties {
    let mut properties = SyncableProperties::new(source);
    properties.auth = auth.map(|auth| AuthFlagData { auth });
    properties.remote = Some(RemoteFlagData {
        remote: remote.to_string(),
    });
    properties.endpoint = address.map(|address| EndpointFlagData { address });
    properties.interfaces = interfaces;
    properties.fields = fields;
    properties
}

pub fn classify_type(node: TypeNode, renames: &Renames) -> DefinitionData {
    let name = renames.name(&node.name).to_string();
    let source = node.location.source;
    let remote = node.remote;
    let figment = node.directives.figment;
    let unique = node
        .directives
        .unique
        .then_some(UniqueFlagData { implicit: false });

    match node.kind {
        TypeKind::Input if node.directives.variety => DefinitionData::Variety(VarietyData {
            name,
            description: node.description,
            variants: node
                .fields
                .into_iter()
                .map(|f| {
                    let field = field_data(f, &remote, renames);
                    VariantData {
                        name: field.name,
                        variant_type: field.field_type,
                        description: field.description,
                        source: field.source,
                    }
                })
                .collect(),
            remote: Some(RemoteFlagData { remote }),
            source,
        }),
        TypeKind::Object | TypeKind::Interface | TypeKind::Input => {
            let interfaces = node
                .interfaces
                .iter()
                .map(|i| renames.name(i).to_string())
                .collect();
            let fields = node
                .fields
                .into_iter()
                .map(|f| field_data(f, &remote, renames))
                .collect();
            DefinitionData::Thing(ThingData {
                name,
                description: node.description,
                is_interface: node.kind == TypeKind::Interface,
                is_input: node.kind == TypeKind::Input,
                unique,
                query: None,
                properties: properties(
                    &remote,
                    figment.auth,
                    figment.address,
                    interfaces,
                    fields,
                    source,
                ),
            })
        }
        TypeKind::Union => DefinitionData::Variety(VarietyData {
            name,
            description: node.description,
            variants: node
                .members
                .into_iter()
                .map(|member| {
                    let member_name = renames.name(&member.name).to_string();
                    VariantData {
                        variant_type: FieldTypeData::reference(
                            member_name.clone(),
                            Required::Unspecified,
                        ),
                        name: member_name,
                        description: None,
                        source: member.location.source,
                    }
                })
                .collect(),
            remote: Some(RemoteFlagData { remote }),
            source,
        }),
        TypeKind::Enum => DefinitionData::Enum(EnumData {
            name,
            description: node.description,
            values: node
                .values
                .into_iter()
                .map(|value| {
                    let deprecated = value.directives.deprecated;
                    EnumValueData {
                        name: value.name,
                        value: value.directives.figment.enum_value,
                        description: value.description,
                        deprecated: deprecated.is_some(),
                        deprecation_reason: deprecated.and_then(|d| d.reason),
                        source: value.location.source,
                    }
                })
                .collect(),
            remote: Some(RemoteFlagData { remote }),
            source,
        }),
        TypeKind::Scalar => DefinitionData::Value(ValueData {
            name,
            description: node.description,
            builtin: false,
            source,
        }),
    }
}

/// A Mutation field as an action resolving to the field's return type.
pub fn classify_mutation(
    mutation: MutationField,
    defaults: &FigmentArgs,
    renames: &Renames,
) -> ActionData {
    let MutationField {
        field,
        owner,
        remote,
    } = mutation;
    let figment = field.directives.figment.clone();

    let name = figment.name.unwrap_or_else(|| field.name.clone());
    let auth = figment
        .auth
        .or(owner.auth)
        .or_else(|| defaults.auth.clone());
    let address = figment
        .address
        .or(owner.address)
        .or_else(|| defaults.address.clone());
    let priority = figment
        .priority
        .or(owner.priority)
        .map(|priority| PriorityFlagData { priority });
    let effect = figment.effect.or(owner.effect);

    let resolves = ResolvesFlagData {
        field: field.name.clone(),
        field_type: renames.apply(field.field_type.clone()),
    };
    let source = field.location.source.clone();
    let fields = field
        .arguments
        .into_iter()
        .map(|arg| field_data(arg, &remote, renames))
        .collect();

    ActionData {
        name,
        description: field.description,
        is_base: false,
        priority,
        effect,
        resolves: Some(resolves),
        operation: None,
        properties: properties(&remote, auth, address, Vec::new(), fields, source),
    }
}

/// A base action assembled from `@base_action_field` declarations.
pub fn classify_base_action(
    base_action: BaseActionNode,
    diagnostics: &mut Diagnostics,
) -> Option<ActionData> {
    let BaseActionNode { directive, remote } = base_action;

    let mut fields = Vec::with_capacity(directive.fields.len());
    let mut valid = true;
    for declared in directive.fields {
        match parse_type_string(&declared.type_string) {
            Ok(field_type) => {
                let mut field = FieldData::new(declared.name, field_type, declared.location.source);
                field.description = declared.description;
                fields.push(field);
            }
            Err(reason) => {
                diagnostics
                    .report(DiagnosticKind::InvalidTypeString, declared.location)
                    .message(format!(
                        "`{}` for `{}`: {}",
                        declared.type_string, declared.name, reason
                    ))
                    .emit();
                valid = false;
            }
        }
    }
    if !valid {
        return None;
    }

    Some(ActionData {
        name: directive.name,
        description: None,
        is_base: true,
        priority: None,
        effect: None,
        resolves: None,
        operation: None,
        properties: properties(
            &remote,
            None,
            None,
            Vec::new(),
            fields,
            directive.location.source,
        ),
    })
}
