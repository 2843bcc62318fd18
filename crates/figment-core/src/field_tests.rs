use crate::{DerivesData, FieldData, FieldTypeData, RemapData, Required, Source};

#[test]
fn display_reference() {
    let ty = FieldTypeData::reference("Widget", Required::Required);
    insta::assert_snapshot!(ty.to_string(), @"Widget!");

    let ty = FieldTypeData::reference("Widget", Required::Optional);
    insta::assert_snapshot!(ty.to_string(), @"Widget");

    let ty = FieldTypeData::reference("Widget", Required::Unspecified);
    insta::assert_snapshot!(ty.to_string(), @"Widget?");
}

#[test]
fn display_nested() {
    let ty = FieldTypeData::list(
        FieldTypeData::reference("Widget", Required::Required),
        Required::Required,
    );
    insta::assert_snapshot!(ty.to_string(), @"[Widget!]!");

    let ty = FieldTypeData::map(
        FieldTypeData::reference("Int", Required::Optional),
        Required::Optional,
    );
    insta::assert_snapshot!(ty.to_string(), @"{Int}");
}

#[test]
fn definition_is_innermost_reference() {
    let ty = FieldTypeData::list(
        FieldTypeData::list(
            FieldTypeData::reference("Widget", Required::Optional),
            Required::Optional,
        ),
        Required::Required,
    );

    assert_eq!(ty.definition(), "Widget");
    assert!(ty.is_required());
}

#[test]
fn rename_definition_keeps_wrappers() {
    let mut ty = FieldTypeData::list(
        FieldTypeData::reference("Widget", Required::Required),
        Required::Optional,
    );
    ty.rename_definition("Gadget");

    assert_eq!(ty.to_string(), "[Gadget!]");
}

#[test]
fn field_aliases_and_derivation() {
    let mut field = FieldData::new(
        "title",
        FieldTypeData::reference("String", Required::Optional),
        Source::builtin(),
    );
    assert!(!field.is_derived());
    assert_eq!(field.alias_for("client_api"), None);

    field
        .aliases
        .insert("client_api".to_string(), "resolved_title".to_string());
    field.derives.remap = Some(RemapData {
        path: "item.title".to_string(),
    });

    assert!(field.is_derived());
    assert_eq!(field.alias_for("client_api"), Some("resolved_title"));
}

#[test]
fn derives_merge_prefers_newer_rules() {
    let mut base = DerivesData {
        remap: Some(RemapData {
            path: "a".to_string(),
        }),
        ..DerivesData::default()
    };
    base.merge(DerivesData {
        remap: Some(RemapData {
            path: "b".to_string(),
        }),
        ..DerivesData::default()
    });

    assert_eq!(base.remap.map(|r| r.path).as_deref(), Some("b"));
    assert!(base.first_available.is_none());
}
