//! The recognized directive vocabulary.
//!
//! Directives are read into typed records as soon as a node is ingested;
//! nothing downstream looks at raw directive syntax again.

#[cfg(test)]
mod tests;

use apollo_parser::cst::{self, CstNode};
use figment_core::{DerivesData, FirstAvailableData, InstructionsData, ReactivesData, RemapData};
use indexmap::IndexMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::Location;
use crate::syntax::{ConstValue, DocumentContext, name_of};

// ============================================================================
// Vocabulary
// ============================================================================

pub const FIGMENT: &str = "figment";
pub const ID: &str = "id";
pub const HASH_TARGET: &str = "hash_target";
pub const LOCAL: &str = "local";
pub const ROOT_VALUE: &str = "root_value";
pub const DERIVES: &str = "derives";
pub const UNIQUE: &str = "unique";
pub const VARIETY: &str = "variety";
pub const DEPRECATED: &str = "deprecated";
pub const EXTEND: &str = "extend";
pub const ENUM_VALUE: &str = "enum_value";
pub const REMOTE: &str = "remote";
pub const BASE_ACTION: &str = "base_action";
pub const BASE_ACTION_FIELD: &str = "base_action_field";

/// `@figment` arguments named `<remote>_alias` carry per-remote field names.
pub const ALIAS_SUFFIX: &str = "_alias";

const INTERNAL: [&str; 13] = [
    FIGMENT,
    ID,
    HASH_TARGET,
    LOCAL,
    ROOT_VALUE,
    DERIVES,
    UNIQUE,
    VARIETY,
    EXTEND,
    ENUM_VALUE,
    REMOTE,
    BASE_ACTION,
    BASE_ACTION_FIELD,
];

/// Whether a directive is consumed by the compiler and must never reach a remote.
pub fn is_internal(name: &str) -> bool {
    INTERNAL.contains(&name)
}

// ============================================================================
// Raw directives
// ============================================================================

/// One directive occurrence with constant arguments.
#[derive(Debug, Clone)]
pub struct Directive {
    pub name: String,
    pub arguments: IndexMap<String, ConstValue>,
    pub location: Location,
}

impl Directive {
    fn read(directive: &cst::Directive, ctx: &DocumentContext<'_>) -> Option<Self> {
        let name = name_of(directive.name())?;
        let arguments = directive
            .arguments()
            .map(|args| {
                args.arguments()
                    .filter_map(|arg| {
                        let name = name_of(arg.name())?;
                        let value = arg.value()?;
                        Some((name, ConstValue::from_cst(&value)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name,
            arguments,
            location: ctx.locate(directive.syntax()),
        })
    }

    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments.get(name)
    }

    /// A string-like argument. Numbers are accepted as written.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.argument(name)? {
            ConstValue::String(s)
            | ConstValue::Enum(s)
            | ConstValue::Int(s)
            | ConstValue::Float(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.argument(name).and_then(ConstValue::as_bool)
    }

    pub fn strings(&self, name: &str) -> Option<Vec<String>> {
        self.argument(name).and_then(ConstValue::as_string_list)
    }
}

pub fn read_directives(
    directives: Option<cst::Directives>,
    ctx: &DocumentContext<'_>,
) -> Vec<Directive> {
    directives
        .map(|d| {
            d.directives()
                .filter_map(|directive| Directive::read(&directive, ctx))
                .collect()
        })
        .unwrap_or_default()
}

fn find<'d>(directives: &'d [Directive], name: &str) -> Option<&'d Directive> {
    directives.iter().find(|d| d.name == name)
}

fn has(directives: &[Directive], name: &str) -> bool {
    find(directives, name).is_some()
}

fn missing_argument(diagnostics: &mut Diagnostics, directive: &Directive, argument: &str) {
    diagnostics
        .report(
            DiagnosticKind::MissingDirectiveArgument,
            directive.location.clone(),
        )
        .message(format!("`@{}` needs `{}`", directive.name, argument))
        .emit();
}

// ============================================================================
// @figment
// ============================================================================

/// Arguments of `@figment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigmentArgs {
    pub name: Option<String>,
    pub auth: Option<String>,
    pub address: Option<String>,
    /// Remote name → name on that remote.
    pub aliases: IndexMap<String, String>,
    pub priority: Option<String>,
    pub effect: Option<String>,
    pub enum_value: Option<String>,
}

impl FigmentArgs {
    pub fn read(directives: &[Directive]) -> Self {
        let Some(directive) = find(directives, FIGMENT) else {
            return Self::default();
        };

        let aliases = directive
            .arguments
            .keys()
            .filter_map(|key| {
                let remote = key.strip_suffix(ALIAS_SUFFIX)?;
                let alias = directive.text(key)?;
                (!remote.is_empty()).then(|| (remote.to_string(), alias))
            })
            .collect();

        Self {
            name: directive.text("name"),
            auth: directive.text("auth"),
            address: directive.text("address"),
            aliases,
            priority: directive.text("priority"),
            effect: directive.text("effect"),
            enum_value: directive.text("enum_value"),
        }
    }

    /// Overlay `other`; values it sets win.
    pub fn union(&mut self, other: FigmentArgs) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.name, other.name);
        take(&mut self.auth, other.auth);
        take(&mut self.address, other.address);
        take(&mut self.priority, other.priority);
        take(&mut self.effect, other.effect);
        take(&mut self.enum_value, other.enum_value);
        self.aliases.extend(other.aliases);
    }

    /// Whether `name` is one of the per-remote aliases.
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.values().any(|alias| alias == name)
    }
}

// ============================================================================
// Fields, arguments and variables
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deprecation {
    pub reason: Option<String>,
}

/// Directives recognized on fields, arguments and variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDirectives {
    pub figment: FigmentArgs,
    pub identifying: bool,
    pub hash_target: bool,
    pub local_only: bool,
    pub root: bool,
    pub derives: DerivesData,
    pub deprecated: Option<Deprecation>,
}

impl FieldDirectives {
    pub fn read(directives: &[Directive]) -> Self {
        Self {
            figment: FigmentArgs::read(directives),
            identifying: has(directives, ID),
            hash_target: has(directives, HASH_TARGET),
            local_only: has(directives, LOCAL),
            root: has(directives, ROOT_VALUE),
            derives: find(directives, DERIVES)
                .map(read_derives)
                .unwrap_or_default(),
            deprecated: find(directives, DEPRECATED).map(|d| Deprecation {
                reason: d.text("reason"),
            }),
        }
    }

    /// Union with another occurrence of the same field; markers accumulate
    /// and values set in `other` win.
    pub fn union(&mut self, other: FieldDirectives) {
        self.figment.union(other.figment);
        self.identifying |= other.identifying;
        self.hash_target |= other.hash_target;
        self.local_only |= other.local_only;
        self.root |= other.root;
        self.derives.merge(other.derives);
        if other.deprecated.is_some() {
            self.deprecated = other.deprecated;
        }
    }
}

fn read_derives(directive: &Directive) -> DerivesData {
    DerivesData {
        first_available: directive
            .strings("first_available")
            .map(|fields| FirstAvailableData { fields }),
        remap: directive.text("remap").map(|path| RemapData { path }),
        reactives: directive
            .strings("reactive")
            .map(|fields| ReactivesData { fields }),
        instructions: directive
            .text("instructions")
            .map(|instructions| InstructionsData { instructions }),
    }
}

// ============================================================================
// Types and operations
// ============================================================================

/// Directives recognized on type definitions and operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDirectives {
    pub figment: FigmentArgs,
    pub unique: bool,
    pub variety: bool,
}

impl TypeDirectives {
    pub fn read(directives: &[Directive]) -> Self {
        Self {
            figment: FigmentArgs::read(directives),
            unique: has(directives, UNIQUE),
            variety: has(directives, VARIETY),
        }
    }

    pub fn union(&mut self, other: TypeDirectives) {
        self.figment.union(other.figment);
        self.unique |= other.unique;
        self.variety |= other.variety;
    }
}

// ============================================================================
// Extensions
// ============================================================================

/// `@extend` on a type extension: augments an existing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendDirective {
    pub field: String,
    pub identifying: Option<bool>,
    pub reactive: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub location: Location,
}

impl ExtendDirective {
    pub fn read_all(directives: &[Directive], diagnostics: &mut Diagnostics) -> Vec<Self> {
        directives
            .iter()
            .filter(|d| d.name == EXTEND)
            .filter_map(|d| {
                let Some(field) = d.text("field") else {
                    missing_argument(diagnostics, d, "field");
                    return None;
                };
                Some(Self {
                    field,
                    identifying: d.flag("id"),
                    reactive: d.strings("reactive"),
                    instructions: d.text("instructions"),
                    location: d.location.clone(),
                })
            })
            .collect()
    }
}

/// `@enum_value` on an enum extension: overrides a member's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueOverride {
    pub name: String,
    pub value: String,
    pub location: Location,
}

impl EnumValueOverride {
    pub fn read_all(directives: &[Directive], diagnostics: &mut Diagnostics) -> Vec<Self> {
        directives
            .iter()
            .filter(|d| d.name == ENUM_VALUE)
            .filter_map(|d| {
                let Some(name) = d.text("name") else {
                    missing_argument(diagnostics, d, "name");
                    return None;
                };
                let Some(value) = d.text("value") else {
                    missing_argument(diagnostics, d, "value");
                    return None;
                };
                Some(Self {
                    name,
                    value,
                    location: d.location.clone(),
                })
            })
            .collect()
    }
}

// ============================================================================
// extend schema
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDirective {
    pub name: String,
    pub address: Option<String>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseActionField {
    pub name: String,
    /// Type in GraphQL syntax, with `{T}` for maps.
    pub type_string: String,
    pub description: Option<String>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseActionDirective {
    pub name: String,
    pub fields: Vec<BaseActionField>,
    pub location: Location,
}

/// Directives on an `extend schema` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDirectives {
    pub remote: Option<RemoteDirective>,
    pub base_action: Option<BaseActionDirective>,
}

impl SchemaDirectives {
    pub fn read(directives: &[Directive], diagnostics: &mut Diagnostics) -> Self {
        let remote = find(directives, REMOTE).and_then(|d| {
            let Some(name) = d.text("name") else {
                diagnostics
                    .report(DiagnosticKind::MissingRemoteArguments, d.location.clone())
                    .emit();
                return None;
            };
            Some(RemoteDirective {
                name,
                address: d.text("address"),
                location: d.location.clone(),
            })
        });

        let fields: Vec<BaseActionField> = directives
            .iter()
            .filter(|d| d.name == BASE_ACTION_FIELD)
            .filter_map(|d| {
                let Some(name) = d.text("name") else {
                    missing_argument(diagnostics, d, "name");
                    return None;
                };
                let Some(type_string) = d.text("type") else {
                    missing_argument(diagnostics, d, "type");
                    return None;
                };
                Some(BaseActionField {
                    name,
                    type_string,
                    description: d.text("description"),
                    location: d.location.clone(),
                })
            })
            .collect();

        let base_action = match find(directives, BASE_ACTION) {
            Some(d) => match d.text("name") {
                Some(name) => Some(BaseActionDirective {
                    name,
                    fields,
                    location: d.location.clone(),
                }),
                None => {
                    missing_argument(diagnostics, d, "name");
                    None
                }
            },
            None => {
                if let Some(first) = fields.first() {
                    diagnostics
                        .report(DiagnosticKind::OrphanBaseAction, first.location.clone())
                        .message("`@base_action_field` without `@base_action`")
                        .emit();
                }
                None
            }
        };

        Self {
            remote,
            base_action,
        }
    }
}
