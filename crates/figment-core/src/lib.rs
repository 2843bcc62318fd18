#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Intermediate representation produced by the Figment compiler.
//!
//! The IR is a flat, ordered list of [`DefinitionData`] nodes. Every node
//! carries a [`Source`] so generated code can point back at the schema or
//! operation document it came from. Nodes are built once per parse and are
//! read-only afterwards.
//!
//! Layout:
//! - [`definition`]: the closed set of definition kinds
//! - [`field`]: fields and field types
//! - [`flags`]: records produced from recognized directives
//! - [`builtins`]: names of synthesized definitions

pub mod builtins;
pub mod definition;
pub mod field;
pub mod flags;
pub mod source;

#[cfg(test)]
mod definition_tests;
#[cfg(test)]
mod field_tests;

// ============================================================================
// Re-exports
// ============================================================================

pub use definition::{
    ActionData, AuthData, DefinitionData, DefinitionKind, EnumData, EnumValueData, RemoteData,
    SyncableProperties, ThingData, ValueData, VariantData, VarietyData,
};
pub use field::{FieldData, FieldTypeData, Required};
pub use flags::{
    AuthFlagData, DerivesData, EndpointFlagData, FirstAvailableData, InstructionsData,
    PriorityFlagData, ReactivesData, RemapData, RemoteFlagData, ResolvesFlagData, UniqueFlagData,
};
pub use source::{LineRange, Source};

/// Serialize a definition list to pretty JSON for downstream tooling.
pub fn to_json(definitions: &[DefinitionData]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(definitions)
}

/// Parse a definition list previously written by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<DefinitionData>, serde_json::Error> {
    serde_json::from_str(json)
}
