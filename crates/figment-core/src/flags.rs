//! Flag and derivation records produced from recognized directives.

use serde::{Deserialize, Serialize};

use crate::field::FieldTypeData;

/// Owning remote of a thing or action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteFlagData {
    pub remote: String,
}

/// Auth kind required to sync a thing or action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthFlagData {
    pub auth: String,
}

/// Network address overriding the remote's default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointFlagData {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityFlagData {
    pub priority: String,
}

/// Links an action to the type its response deserializes into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvesFlagData {
    /// Mutation field the response comes from.
    pub field: String,
    pub field_type: FieldTypeData,
}

/// Marks a definition with exactly one logical instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueFlagData {
    /// Inferred from a variable-less query rather than declared with `@unique`.
    pub implicit: bool,
}

/// Value is the first non-null of the listed fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirstAvailableData {
    pub fields: Vec<String>,
}

/// Value is read from another field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemapData {
    pub path: String,
}

/// Fields whose changes recompute this field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactivesData {
    pub fields: Vec<String>,
}

/// Free-form derivation instructions passed through to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructionsData {
    pub instructions: String,
}

/// Derivation rules of a computed field. Empty for plain fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivesData {
    pub first_available: Option<FirstAvailableData>,
    pub remap: Option<RemapData>,
    pub reactives: Option<ReactivesData>,
    pub instructions: Option<InstructionsData>,
}

impl DerivesData {
    pub fn is_empty(&self) -> bool {
        self.first_available.is_none()
            && self.remap.is_none()
            && self.reactives.is_none()
            && self.instructions.is_none()
    }

    /// Overlays `other` on top of `self`; rules set in `other` win.
    pub fn merge(&mut self, other: DerivesData) {
        if other.first_available.is_some() {
            self.first_available = other.first_available;
        }
        if other.remap.is_some() {
            self.remap = other.remap;
        }
        if other.reactives.is_some() {
            self.reactives = other.reactives;
        }
        if other.instructions.is_some() {
            self.instructions = other.instructions;
        }
    }
}
