use serde_json::json;

use crate::{
    AuthData, DefinitionData, DefinitionKind, FieldData, FieldTypeData, LineRange, Required,
    Source, SyncableProperties, ThingData, UniqueFlagData,
};

fn widget() -> DefinitionData {
    let source = Source::new("widget.graphqls", LineRange::new(1, 4));
    let mut properties = SyncableProperties::new(source.clone());
    let mut id = FieldData::new(
        "id",
        FieldTypeData::reference("ID", Required::Required),
        Source::new("widget.graphqls", LineRange::single(2)),
    );
    id.identifying = true;
    properties.fields.push(id);
    properties.fields.push(FieldData::new(
        "name",
        FieldTypeData::reference("String", Required::Optional),
        Source::new("widget.graphqls", LineRange::single(3)),
    ));

    DefinitionData::Thing(ThingData {
        name: "Widget".to_string(),
        description: Some("A widget.".to_string()),
        is_interface: false,
        is_input: false,
        unique: None,
        query: None,
        properties,
    })
}

#[test]
fn accessors() {
    let def = widget();

    assert_eq!(def.name(), "Widget");
    assert_eq!(def.kind(), DefinitionKind::Thing);
    assert_eq!(def.source().to_string(), "widget.graphqls:1-4");
    assert_eq!(def.description(), Some("A widget."));

    let properties = def.properties().expect("things are syncable");
    let identifying: Vec<_> = properties
        .identifying_fields()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(identifying, ["id"]);
    assert!(properties.field("name").is_some());
    assert!(properties.field("missing").is_none());
}

#[test]
fn auth_is_not_syncable() {
    let def = DefinitionData::Auth(AuthData {
        name: "user".to_string(),
        source: Source::builtin(),
    });

    assert!(def.properties().is_none());
    assert_eq!(def.kind().to_string(), "auth");
}

#[test]
fn serializes_with_kind_tag() {
    let def = DefinitionData::Auth(AuthData {
        name: "guid".to_string(),
        source: Source::builtin(),
    });

    let value = serde_json::to_value(&def).expect("serializable");
    assert_eq!(
        value,
        json!({
            "kind": "auth",
            "name": "guid",
            "source": { "path": "<builtin>", "lines": { "start": 1, "end": 1 } }
        })
    );
}

#[test]
fn json_round_trip_preserves_order() {
    let mut defs = vec![widget()];
    if let DefinitionData::Thing(thing) = &mut defs[0] {
        thing.unique = Some(UniqueFlagData { implicit: false });
    }

    let json = crate::to_json(&defs).expect("serializable");
    let back = crate::from_json(&json).expect("deserializable");

    assert_eq!(back, defs);
    let names: Vec<String> = back[0]
        .properties()
        .expect("things are syncable")
        .fields
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, ["id", "name"]);
}
