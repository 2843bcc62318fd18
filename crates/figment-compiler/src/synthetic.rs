//! Built-in definitions appended to every parse.

use figment_core::builtins::{AUTH_KINDS, BASE_ACTION, BUILTIN_SCALARS, TIME_FIELD, TIMESTAMP};
use figment_core::{
    ActionData, AuthData, DefinitionData, FieldData, FieldTypeData, RemoteData, Required, Source,
    SyncableProperties, ValueData,
};

/// Scalars, the base action, auth kinds and the default remote, in that
/// order. Independent of the documents being parsed.
pub fn synthesize(default_remote: &str) -> Vec<DefinitionData> {
    let mut out = Vec::with_capacity(BUILTIN_SCALARS.len() + AUTH_KINDS.len() + 2);

    out.extend(BUILTIN_SCALARS.iter().map(|name| {
        DefinitionData::Value(ValueData {
            name: name.to_string(),
            description: None,
            builtin: true,
            source: Source::builtin(),
        })
    }));

    out.push(DefinitionData::Action(base_action()));

    out.extend(AUTH_KINDS.iter().map(|name| {
        DefinitionData::Auth(AuthData {
            name: name.to_string(),
            source: Source::builtin(),
        })
    }));

    out.push(DefinitionData::Remote(RemoteData {
        name: default_remote.to_string(),
        endpoint: None,
        base_action: None,
        builtin: true,
        source: Source::builtin(),
    }));

    out
}

/// Contributes the required `time` field to every action.
fn base_action() -> ActionData {
    let mut properties = SyncableProperties::new(Source::builtin());
    properties.fields.push(FieldData::new(
        TIME_FIELD,
        FieldTypeData::reference(TIMESTAMP, Required::Required),
        Source::builtin(),
    ));

    ActionData {
        name: BASE_ACTION.to_string(),
        description: None,
        is_base: true,
        priority: None,
        effect: None,
        resolves: None,
        operation: None,
        properties,
    }
}
