//! Fields and field types.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::flags::DerivesData;
use crate::source::Source;

/// Nullability of a field type as declared in the schema.
///
/// `Unspecified` is used where the schema language has no way to say it,
/// e.g. union members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Required {
    Required,
    Optional,
    #[default]
    Unspecified,
}

impl Required {
    pub fn from_non_null(non_null: bool) -> Self {
        if non_null {
            Self::Required
        } else {
            Self::Optional
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Required => "!",
            Self::Optional => "",
            Self::Unspecified => "?",
        }
    }
}

/// Type of a field: a reference to a named definition, or a list/map of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldTypeData {
    Reference {
        definition: String,
        required: Required,
    },
    List {
        item: Box<FieldTypeData>,
        required: Required,
    },
    /// String-keyed map.
    Map {
        value: Box<FieldTypeData>,
        required: Required,
    },
}

impl FieldTypeData {
    pub fn reference(definition: impl Into<String>, required: Required) -> Self {
        Self::Reference {
            definition: definition.into(),
            required,
        }
    }

    pub fn list(item: FieldTypeData, required: Required) -> Self {
        Self::List {
            item: Box::new(item),
            required,
        }
    }

    pub fn map(value: FieldTypeData, required: Required) -> Self {
        Self::Map {
            value: Box::new(value),
            required,
        }
    }

    pub fn required(&self) -> Required {
        match self {
            Self::Reference { required, .. }
            | Self::List { required, .. }
            | Self::Map { required, .. } => *required,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required() == Required::Required
    }

    /// The innermost named definition.
    pub fn definition(&self) -> &str {
        match self {
            Self::Reference { definition, .. } => definition,
            Self::List { item, .. } => item.definition(),
            Self::Map { value, .. } => value.definition(),
        }
    }

    /// Points the innermost reference at another definition.
    pub fn rename_definition(&mut self, name: &str) {
        match self {
            Self::Reference { definition, .. } => *definition = name.to_owned(),
            Self::List { item, .. } => item.rename_definition(name),
            Self::Map { value, .. } => value.rename_definition(name),
        }
    }
}

impl fmt::Display for FieldTypeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference {
                definition,
                required,
            } => write!(f, "{}{}", definition, required.suffix()),
            Self::List { item, required } => write!(f, "[{}]{}", item, required.suffix()),
            Self::Map { value, required } => write!(f, "{{{}}}{}", value, required.suffix()),
        }
    }
}

/// A field of a thing, action or base action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    pub name: String,
    /// Remote name → the field's name on that remote.
    pub aliases: IndexMap<String, String>,
    pub field_type: FieldTypeData,
    pub identifying: bool,
    pub hash_target: bool,
    pub deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub local_only: bool,
    pub root: bool,
    pub derives: DerivesData,
    pub description: Option<String>,
    pub source: Source,
}

impl FieldData {
    pub fn new(name: impl Into<String>, field_type: FieldTypeData, source: Source) -> Self {
        Self {
            name: name.into(),
            aliases: IndexMap::new(),
            field_type,
            identifying: false,
            hash_target: false,
            deprecated: false,
            deprecation_reason: None,
            local_only: false,
            root: false,
            derives: DerivesData::default(),
            description: None,
            source,
        }
    }

    pub fn alias_for(&self, remote: &str) -> Option<&str> {
        self.aliases.get(remote).map(String::as_str)
    }

    pub fn is_derived(&self) -> bool {
        !self.derives.is_empty()
    }
}
