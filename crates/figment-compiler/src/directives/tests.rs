use apollo_parser::cst;
use figment_core::{FirstAvailableData, InstructionsData, ReactivesData, RemapData};
use indoc::indoc;

use super::*;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::SourceMap;
use crate::syntax::{DocumentContext, parse_sources};

/// Directives of the first definition and of its first field.
fn read(src: &str) -> (Vec<Directive>, Vec<Directive>, Diagnostics) {
    let mut sources = SourceMap::new();
    let id = sources.add_schema("schema.graphqls", src);
    let parsed = parse_sources(&sources).unwrap();
    let ctx = DocumentContext::new(&sources, id);

    let definition = parsed[0].document.definitions().next().unwrap();
    let (type_directives, fields) = match definition {
        cst::Definition::ObjectTypeDefinition(o) => (o.directives(), o.fields_definition()),
        cst::Definition::ObjectTypeExtension(o) => (o.directives(), o.fields_definition()),
        cst::Definition::SchemaExtension(s) => (s.directives(), None),
        cst::Definition::EnumTypeExtension(e) => (e.directives(), None),
        other => panic!("unexpected definition {}", crate::syntax::definition_label(&other)),
    };
    let field_directives = fields
        .and_then(|f| f.field_definitions().next())
        .and_then(|f| f.directives());

    (
        read_directives(type_directives, &ctx),
        read_directives(field_directives, &ctx),
        Diagnostics::new(),
    )
}

#[test]
fn internal_vocabulary() {
    assert!(is_internal("figment"));
    assert!(is_internal("base_action_field"));
    assert!(is_internal("local"));
    assert!(!is_internal("deprecated"));
    assert!(!is_internal("include"));
}

#[test]
fn figment_arguments() {
    let (directives, _, _) = read(indoc! {r#"
        type Widget @figment(name: "Gadget", auth: "user", address: "/v2", priority: 3, client_api_alias: "widget_v1", effect: "refresh") {
          id: ID
        }
    "#});

    let args = FigmentArgs::read(&directives);

    assert_eq!(args.name.as_deref(), Some("Gadget"));
    assert_eq!(args.auth.as_deref(), Some("user"));
    assert_eq!(args.address.as_deref(), Some("/v2"));
    assert_eq!(args.priority.as_deref(), Some("3"));
    assert_eq!(args.effect.as_deref(), Some("refresh"));
    assert_eq!(
        args.aliases.get("client_api").map(String::as_str),
        Some("widget_v1")
    );
    assert!(args.has_alias("widget_v1"));
    assert_eq!(args.enum_value, None);
}

#[test]
fn field_markers_and_derivations() {
    let (_, directives, _) = read(indoc! {r#"
        type Widget {
          title: String @id @hash_target @local @root_value @deprecated(reason: "use name") @derives(first_available: ["name", "label"], remap: "meta.title", reactive: "name", instructions: "trim")
        }
    "#});

    let field = FieldDirectives::read(&directives);

    assert!(field.identifying);
    assert!(field.hash_target);
    assert!(field.local_only);
    assert!(field.root);
    assert_eq!(
        field.deprecated,
        Some(Deprecation {
            reason: Some("use name".into())
        })
    );
    assert_eq!(
        field.derives.first_available,
        Some(FirstAvailableData {
            fields: vec!["name".into(), "label".into()]
        })
    );
    assert_eq!(
        field.derives.remap,
        Some(RemapData {
            path: "meta.title".into()
        })
    );
    assert_eq!(
        field.derives.reactives,
        Some(ReactivesData {
            fields: vec!["name".into()]
        })
    );
    assert_eq!(
        field.derives.instructions,
        Some(InstructionsData {
            instructions: "trim".into()
        })
    );
}

#[test]
fn field_union_accumulates_markers() {
    let mut base = FieldDirectives {
        identifying: true,
        ..FieldDirectives::default()
    };
    base.figment.auth = Some("user".into());

    let mut other = FieldDirectives {
        local_only: true,
        ..FieldDirectives::default()
    };
    other.figment.auth = Some("admin".into());
    other.figment.aliases.insert("client_api".into(), "old".into());

    base.union(other);

    assert!(base.identifying);
    assert!(base.local_only);
    assert_eq!(base.figment.auth.as_deref(), Some("admin"));
    assert!(base.figment.has_alias("old"));
}

#[test]
fn type_markers() {
    let (directives, _, _) = read("type Settings @unique { theme: String }");

    let type_directives = TypeDirectives::read(&directives);

    assert!(type_directives.unique);
    assert!(!type_directives.variety);
}

#[test]
fn extend_directives() {
    let (directives, _, mut diagnostics) = read(indoc! {r#"
        extend type Widget
          @extend(field: "id", id: true)
          @extend(field: "title", reactive: ["name"], instructions: "upper")
          @extend(id: true)
    "#});

    let extends = ExtendDirective::read_all(&directives, &mut diagnostics);

    assert_eq!(extends.len(), 2);
    assert_eq!(extends[0].field, "id");
    assert_eq!(extends[0].identifying, Some(true));
    assert_eq!(extends[1].reactive, Some(vec!["name".to_string()]));
    assert_eq!(extends[1].instructions.as_deref(), Some("upper"));
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.contains(DiagnosticKind::MissingDirectiveArgument));
}

#[test]
fn enum_value_overrides() {
    let (directives, _, mut diagnostics) = read(indoc! {r#"
        extend enum Color @enum_value(name: "RED", value: "red") @enum_value(name: "BLUE")
    "#});

    let overrides = EnumValueOverride::read_all(&directives, &mut diagnostics);

    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].name, "RED");
    assert_eq!(overrides[0].value, "red");
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn schema_remote_and_base_action() {
    let (directives, _, mut diagnostics) = read(indoc! {r#"
        extend schema
          @remote(name: "client_api", address: "https://api.example.com")
          @base_action(name: "ClientApiAction")
          @base_action_field(name: "deviceId", type: "ID!", description: "Sending device")
          @base_action_field(name: "flags", type: "{Boolean}")
    "#});

    let schema = SchemaDirectives::read(&directives, &mut diagnostics);

    let remote = schema.remote.unwrap();
    assert_eq!(remote.name, "client_api");
    assert_eq!(remote.address.as_deref(), Some("https://api.example.com"));

    let base_action = schema.base_action.unwrap();
    assert_eq!(base_action.name, "ClientApiAction");
    let fields: Vec<(&str, &str)> = base_action
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.type_string.as_str()))
        .collect();
    assert_eq!(fields, [("deviceId", "ID!"), ("flags", "{Boolean}")]);
    assert_eq!(
        base_action.fields[0].description.as_deref(),
        Some("Sending device")
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn remote_without_name_warns() {
    let (directives, _, mut diagnostics) = read(r#"extend schema @remote(address: "https://x")"#);

    let schema = SchemaDirectives::read(&directives, &mut diagnostics);

    assert!(schema.remote.is_none());
    assert!(diagnostics.contains(DiagnosticKind::MissingRemoteArguments));
    assert!(!diagnostics.has_errors());
}

#[test]
fn base_action_fields_without_base_action_warn() {
    let (directives, _, mut diagnostics) =
        read(r#"extend schema @remote(name: "api") @base_action_field(name: "a", type: "Int")"#);

    let schema = SchemaDirectives::read(&directives, &mut diagnostics);

    assert!(schema.base_action.is_none());
    assert!(diagnostics.contains(DiagnosticKind::OrphanBaseAction));
}
