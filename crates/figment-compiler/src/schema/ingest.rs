//! Schema documents to typed nodes.
//!
//! Every recognized directive is read here; later stages only see the
//! typed records.

use apollo_parser::cst::{self, CstNode};
use figment_core::FieldTypeData;

use super::type_ref;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directives::{
    BaseActionDirective, EnumValueOverride, ExtendDirective, FieldDirectives, RemoteDirective,
    SchemaDirectives, TypeDirectives, read_directives,
};
use crate::source::Location;
use crate::syntax::{DocumentContext, ParsedDocument, definition_label, description_of, name_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Interface,
    Input,
    Union,
    Enum,
    Scalar,
}

impl TypeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Object => "object type",
            Self::Interface => "interface",
            Self::Input => "input type",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
        }
    }
}

/// A field, argument or input value.
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// Name as declared in the document.
    pub name: String,
    pub field_type: FieldTypeData,
    pub description: Option<String>,
    pub directives: FieldDirectives,
    pub arguments: Vec<FieldNode>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct EnumValueNode {
    pub name: String,
    pub description: Option<String>,
    pub directives: FieldDirectives,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct MemberNode {
    pub name: String,
    pub location: Location,
}

/// A type definition or extension.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    pub is_extension: bool,
    pub description: Option<String>,
    pub directives: TypeDirectives,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldNode>,
    pub members: Vec<MemberNode>,
    pub values: Vec<EnumValueNode>,
    pub extends: Vec<ExtendDirective>,
    pub enum_overrides: Vec<EnumValueOverride>,
    /// Remote owning the document this node was declared in.
    pub remote: String,
    pub location: Location,
}

impl TypeNode {
    fn new(
        name: String,
        kind: TypeKind,
        is_extension: bool,
        remote: &str,
        location: Location,
    ) -> Self {
        Self {
            name,
            kind,
            is_extension,
            description: None,
            directives: TypeDirectives::default(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            members: Vec::new(),
            values: Vec::new(),
            extends: Vec::new(),
            enum_overrides: Vec::new(),
            remote: remote.to_string(),
            location,
        }
    }
}

/// A base action declared on `extend schema`, bound to its remote.
#[derive(Debug, Clone)]
pub struct BaseActionNode {
    pub directive: BaseActionDirective,
    pub remote: String,
}

/// Everything one schema document contributes.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    pub remote: Option<RemoteDirective>,
    pub base_actions: Vec<BaseActionNode>,
    pub types: Vec<TypeNode>,
}

pub fn ingest_document(
    doc: &ParsedDocument,
    ctx: &DocumentContext<'_>,
    default_remote: &str,
    diagnostics: &mut Diagnostics,
) -> SchemaDocument {
    let mut out = SchemaDocument::default();

    // `@remote` applies to the whole document, wherever it appears.
    let mut base_actions = Vec::new();
    for definition in doc.document.definitions() {
        let cst::Definition::SchemaExtension(extension) = definition else {
            continue;
        };
        let directives = read_directives(extension.directives(), ctx);
        let schema = SchemaDirectives::read(&directives, diagnostics);

        if let Some(remote) = schema.remote {
            if let Some(first) = &out.remote {
                if first.name != remote.name {
                    diagnostics
                        .report(DiagnosticKind::ConflictingRemote, remote.location.clone())
                        .message(format!(
                            "document already belongs to `{}`, not `{}`",
                            first.name, remote.name
                        ))
                        .related_to("remote declared here", first.location.clone())
                        .emit();
                }
            } else {
                out.remote = Some(remote);
            }
        }
        base_actions.extend(schema.base_action);
    }

    for directive in base_actions {
        match &out.remote {
            Some(remote) => out.base_actions.push(BaseActionNode {
                directive,
                remote: remote.name.clone(),
            }),
            None => {
                diagnostics
                    .report(DiagnosticKind::OrphanBaseAction, directive.location.clone())
                    .message(format!(
                        "`{}` is declared in a document without `@remote`",
                        directive.name
                    ))
                    .emit();
            }
        }
    }

    let remote = out
        .remote
        .as_ref()
        .map_or(default_remote, |r| r.name.as_str())
        .to_string();

    for definition in doc.document.definitions() {
        if let Some(node) = ingest_definition(&definition, ctx, &remote, diagnostics) {
            check_duplicate_fields(&node, diagnostics);
            out.types.push(node);
        }
    }

    out
}

fn ingest_definition(
    definition: &cst::Definition,
    ctx: &DocumentContext<'_>,
    remote: &str,
    diagnostics: &mut Diagnostics,
) -> Option<TypeNode> {
    let location = ctx.locate(definition.syntax());
    let new_node = |name: Option<cst::Name>, kind: TypeKind, is_extension: bool| {
        name_of(name).map(|name| TypeNode::new(name, kind, is_extension, remote, location.clone()))
    };

    let node = match definition {
        cst::Definition::ObjectTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Object, false)?;
            node.description = description_of(def.description());
            node.interfaces = interfaces(def.implements_interfaces());
            node.fields = fields(def.fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::ObjectTypeExtension(def) => {
            let mut node = new_node(def.name(), TypeKind::Object, true)?;
            node.interfaces = interfaces(def.implements_interfaces());
            node.fields = fields(def.fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::InterfaceTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Interface, false)?;
            node.description = description_of(def.description());
            node.interfaces = interfaces(def.implements_interfaces());
            node.fields = fields(def.fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::InterfaceTypeExtension(def) => {
            let mut node = new_node(def.name(), TypeKind::Interface, true)?;
            node.interfaces = interfaces(def.implements_interfaces());
            node.fields = fields(def.fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::InputObjectTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Input, false)?;
            node.description = description_of(def.description());
            node.fields = input_fields(def.input_fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::InputObjectTypeExtension(def) => {
            let mut node = new_node(def.name(), TypeKind::Input, true)?;
            node.fields = input_fields(def.input_fields_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::UnionTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Union, false)?;
            node.description = description_of(def.description());
            node.members = members(def.union_member_types(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::UnionTypeExtension(def) => {
            let mut node = new_node(def.name(), TypeKind::Union, true)?;
            node.members = members(def.union_member_types(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::EnumTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Enum, false)?;
            node.description = description_of(def.description());
            node.values = enum_values(def.enum_values_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::EnumTypeExtension(def) => {
            let mut node = new_node(def.name(), TypeKind::Enum, true)?;
            node.values = enum_values(def.enum_values_definition(), ctx);
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::ScalarTypeDefinition(def) => {
            let mut node = new_node(def.name(), TypeKind::Scalar, false)?;
            node.description = description_of(def.description());
            with_directives(node, def.directives(), ctx, diagnostics)
        }
        cst::Definition::ScalarTypeExtension(def) => {
            let node = new_node(def.name(), TypeKind::Scalar, true)?;
            with_directives(node, def.directives(), ctx, diagnostics)
        }

        // Vocabulary declarations and root type mappings carry no IR.
        cst::Definition::DirectiveDefinition(_) | cst::Definition::SchemaDefinition(_) => {
            return None;
        }
        cst::Definition::SchemaExtension(_) => return None,

        cst::Definition::OperationDefinition(_) | cst::Definition::FragmentDefinition(_) => {
            diagnostics
                .report(DiagnosticKind::UnrecognizedDefinition, location.clone())
                .message(format!(
                    "{} in schema document `{}`",
                    definition_label(definition),
                    ctx.path()
                ))
                .emit();
            return None;
        }
    };

    Some(node)
}

fn with_directives(
    mut node: TypeNode,
    directives: Option<cst::Directives>,
    ctx: &DocumentContext<'_>,
    diagnostics: &mut Diagnostics,
) -> TypeNode {
    let directives = read_directives(directives, ctx);
    node.directives = TypeDirectives::read(&directives);
    if node.is_extension {
        node.extends = ExtendDirective::read_all(&directives, diagnostics);
        node.enum_overrides = EnumValueOverride::read_all(&directives, diagnostics);
    }
    node
}

fn interfaces(implements: Option<cst::ImplementsInterfaces>) -> Vec<String> {
    implements
        .map(|i| i.named_types().filter_map(|t| name_of(t.name())).collect())
        .unwrap_or_default()
}

fn members(
    union_members: Option<cst::UnionMemberTypes>,
    ctx: &DocumentContext<'_>,
) -> Vec<MemberNode> {
    union_members
        .map(|m| {
            m.named_types()
                .filter_map(|t| {
                    Some(MemberNode {
                        name: name_of(t.name())?,
                        location: ctx.locate(t.syntax()),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn fields(definition: Option<cst::FieldsDefinition>, ctx: &DocumentContext<'_>) -> Vec<FieldNode> {
    definition
        .map(|d| {
            d.field_definitions()
                .filter_map(|f| field(&f, ctx))
                .collect()
        })
        .unwrap_or_default()
}

fn field(field: &cst::FieldDefinition, ctx: &DocumentContext<'_>) -> Option<FieldNode> {
    let directives = read_directives(field.directives(), ctx);
    Some(FieldNode {
        name: name_of(field.name())?,
        field_type: type_ref::from_cst(&field.ty()?)?,
        description: description_of(field.description()),
        directives: FieldDirectives::read(&directives),
        arguments: field
            .arguments_definition()
            .map(|a| {
                a.input_value_definitions()
                    .filter_map(|v| input_value(&v, ctx))
                    .collect()
            })
            .unwrap_or_default(),
        location: ctx.locate(field.syntax()),
    })
}

fn input_fields(
    definition: Option<cst::InputFieldsDefinition>,
    ctx: &DocumentContext<'_>,
) -> Vec<FieldNode> {
    definition
        .map(|d| {
            d.input_value_definitions()
                .filter_map(|v| input_value(&v, ctx))
                .collect()
        })
        .unwrap_or_default()
}

fn input_value(value: &cst::InputValueDefinition, ctx: &DocumentContext<'_>) -> Option<FieldNode> {
    let directives = read_directives(value.directives(), ctx);
    Some(FieldNode {
        name: name_of(value.name())?,
        field_type: type_ref::from_cst(&value.ty()?)?,
        description: description_of(value.description()),
        directives: FieldDirectives::read(&directives),
        arguments: Vec::new(),
        location: ctx.locate(value.syntax()),
    })
}

fn enum_values(
    definition: Option<cst::EnumValuesDefinition>,
    ctx: &DocumentContext<'_>,
) -> Vec<EnumValueNode> {
    definition
        .map(|d| {
            d.enum_value_definitions()
                .filter_map(|v| {
                    let directives = read_directives(v.directives(), ctx);
                    Some(EnumValueNode {
                        name: name_of(v.enum_value()?.name())?,
                        description: description_of(v.description()),
                        directives: FieldDirectives::read(&directives),
                        location: ctx.locate(v.syntax()),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn check_duplicate_fields(node: &TypeNode, diagnostics: &mut Diagnostics) {
    let names = node
        .fields
        .iter()
        .map(|f| (&f.name, &f.location))
        .chain(node.values.iter().map(|v| (&v.name, &v.location)));

    let mut seen: Vec<(&String, &Location)> = Vec::new();
    for (name, location) in names {
        if let Some((_, first)) = seen.iter().find(|(n, _)| *n == name) {
            diagnostics
                .report(DiagnosticKind::DuplicateField, location.clone())
                .message(name.as_str())
                .related_to("first defined here", (*first).clone())
                .emit();
        } else {
            seen.push((name, location));
        }
    }
}
