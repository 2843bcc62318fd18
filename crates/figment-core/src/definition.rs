//! Definitions: the top-level IR nodes handed to the code generator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldData, FieldTypeData};
use crate::flags::{
    AuthFlagData, EndpointFlagData, PriorityFlagData, RemoteFlagData, ResolvesFlagData,
    UniqueFlagData,
};
use crate::source::Source;

/// Discriminant of [`DefinitionData`], for grouping and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Thing,
    Action,
    Enum,
    Variety,
    Value,
    Remote,
    Auth,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thing => "thing",
            Self::Action => "action",
            Self::Enum => "enum",
            Self::Variety => "variety",
            Self::Value => "value",
            Self::Remote => "remote",
            Self::Auth => "auth",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties shared by everything that syncs with a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncableProperties {
    pub auth: Option<AuthFlagData>,
    pub remote: Option<RemoteFlagData>,
    pub endpoint: Option<EndpointFlagData>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldData>,
    pub source: Source,
}

impl SyncableProperties {
    pub fn new(source: Source) -> Self {
        Self {
            auth: None,
            remote: None,
            endpoint: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            source,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldData> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn identifying_fields(&self) -> impl Iterator<Item = &FieldData> {
        self.fields.iter().filter(|f| f.identifying)
    }

    pub fn remote_name(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.remote.as_str())
    }
}

/// Object, interface or input type, or a client query as a thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingData {
    pub name: String,
    pub description: Option<String>,
    pub is_interface: bool,
    pub is_input: bool,
    pub unique: Option<UniqueFlagData>,
    /// Wire text for things translated from query operations.
    pub query: Option<String>,
    pub properties: SyncableProperties,
}

impl ThingData {
    pub fn is_unique(&self) -> bool {
        self.unique.is_some()
    }

    pub fn root_field(&self) -> Option<&FieldData> {
        self.properties.fields.iter().find(|f| f.root)
    }
}

/// A mutation, either declared on the schema or issued by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub description: Option<String>,
    /// Contributes its fields to other actions instead of being sent itself.
    pub is_base: bool,
    pub priority: Option<PriorityFlagData>,
    pub effect: Option<String>,
    pub resolves: Option<ResolvesFlagData>,
    /// Wire text for actions translated from mutation operations.
    pub operation: Option<String>,
    pub properties: SyncableProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueData {
    pub name: String,
    /// Explicit value override; the name is the value otherwise.
    pub value: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub source: Source,
}

impl EnumValueData {
    pub fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumData {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueData>,
    pub remote: Option<RemoteFlagData>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantData {
    pub name: String,
    pub variant_type: FieldTypeData,
    pub description: Option<String>,
    pub source: Source,
}

/// Closed set of variants: a union, or an input type marked `@variety`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyData {
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<VariantData>,
    pub remote: Option<RemoteFlagData>,
    pub source: Source,
}

/// A scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueData {
    pub name: String,
    pub description: Option<String>,
    pub builtin: bool,
    pub source: Source,
}

/// A backend target that owns things and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteData {
    pub name: String,
    pub endpoint: Option<EndpointFlagData>,
    /// Name of the action whose fields every action of this remote inherits.
    pub base_action: Option<String>,
    pub builtin: bool,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    pub name: String,
    pub source: Source,
}

/// One IR node. Consumers must handle every kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionData {
    Thing(ThingData),
    Action(ActionData),
    Enum(EnumData),
    Variety(VarietyData),
    Value(ValueData),
    Remote(RemoteData),
    Auth(AuthData),
}

impl DefinitionData {
    pub fn name(&self) -> &str {
        match self {
            Self::Thing(d) => &d.name,
            Self::Action(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Variety(d) => &d.name,
            Self::Value(d) => &d.name,
            Self::Remote(d) => &d.name,
            Self::Auth(d) => &d.name,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Thing(_) => DefinitionKind::Thing,
            Self::Action(_) => DefinitionKind::Action,
            Self::Enum(_) => DefinitionKind::Enum,
            Self::Variety(_) => DefinitionKind::Variety,
            Self::Value(_) => DefinitionKind::Value,
            Self::Remote(_) => DefinitionKind::Remote,
            Self::Auth(_) => DefinitionKind::Auth,
        }
    }

    pub fn source(&self) -> &Source {
        match self {
            Self::Thing(d) => &d.properties.source,
            Self::Action(d) => &d.properties.source,
            Self::Enum(d) => &d.source,
            Self::Variety(d) => &d.source,
            Self::Value(d) => &d.source,
            Self::Remote(d) => &d.source,
            Self::Auth(d) => &d.source,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Thing(d) => d.description.as_deref(),
            Self::Action(d) => d.description.as_deref(),
            Self::Enum(d) => d.description.as_deref(),
            Self::Variety(d) => d.description.as_deref(),
            Self::Value(d) => d.description.as_deref(),
            Self::Remote(_) | Self::Auth(_) => None,
        }
    }

    /// Syncable properties of things and actions.
    pub fn properties(&self) -> Option<&SyncableProperties> {
        match self {
            Self::Thing(d) => Some(&d.properties),
            Self::Action(d) => Some(&d.properties),
            _ => None,
        }
    }

    pub fn as_thing(&self) -> Option<&ThingData> {
        match self {
            Self::Thing(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionData> {
        match self {
            Self::Action(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumData> {
        match self {
            Self::Enum(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_variety(&self) -> Option<&VarietyData> {
        match self {
            Self::Variety(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteData> {
        match self {
            Self::Remote(d) => Some(d),
            _ => None,
        }
    }
}
