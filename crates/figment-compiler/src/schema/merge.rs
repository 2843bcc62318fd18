//! Folding type extensions into their primary definition.

use figment_core::{InstructionsData, ReactivesData};

use super::grouping::TypeGroup;
use super::ingest::{FieldNode, TypeKind, TypeNode};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Merge every extension into the primary, in declaration order.
///
/// `None` when the group cannot produce a definition; the reason has been
/// reported.
pub fn merge_group(group: TypeGroup, diagnostics: &mut Diagnostics) -> Option<TypeNode> {
    let Some(mut primary) = group.primary else {
        if let Some(first) = group.extensions.first() {
            diagnostics
                .report(DiagnosticKind::ExtensionWithoutPrimary, first.location.clone())
                .message(first.name.as_str())
                .emit();
        }
        return None;
    };

    for extension in group.extensions {
        if extension.kind != primary.kind {
            diagnostics
                .report(DiagnosticKind::ExtensionKindMismatch, extension.location.clone())
                .message(format!(
                    "`{}` is {} {}, extended as {} {}",
                    primary.name,
                    article(primary.kind),
                    primary.kind.label(),
                    article(extension.kind),
                    extension.kind.label()
                ))
                .related_to("primary definition", primary.location.clone())
                .emit();
            continue;
        }
        merge_extension(&mut primary, extension, diagnostics);
    }

    Some(primary)
}

fn article(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Union | TypeKind::Scalar => "a",
        TypeKind::Object | TypeKind::Interface | TypeKind::Input | TypeKind::Enum => "an",
    }
}

fn merge_extension(primary: &mut TypeNode, extension: TypeNode, diagnostics: &mut Diagnostics) {
    primary.directives.union(extension.directives);

    for interface in extension.interfaces {
        if !primary.interfaces.contains(&interface) {
            primary.interfaces.push(interface);
        }
    }

    for field in extension.fields {
        merge_field(primary, field, diagnostics);
    }

    for member in extension.members {
        if !primary.members.iter().any(|m| m.name == member.name) {
            primary.members.push(member);
        }
    }

    for value in extension.values {
        if let Some(existing) = primary.values.iter().find(|v| v.name == value.name) {
            diagnostics
                .report(DiagnosticKind::DuplicateField, value.location.clone())
                .message(value.name.as_str())
                .related_to("first defined here", existing.location.clone())
                .emit();
            continue;
        }
        primary.values.push(value);
    }

    for extend in extension.extends {
        let Some(field) = primary.fields.iter_mut().find(|f| f.name == extend.field) else {
            diagnostics
                .report(DiagnosticKind::UnknownExtendTarget, extend.location.clone())
                .message(extend.field.as_str())
                .emit();
            continue;
        };
        if let Some(identifying) = extend.identifying {
            field.directives.identifying = identifying;
        }
        if let Some(fields) = extend.reactive {
            field.directives.derives.reactives = Some(ReactivesData { fields });
        }
        if let Some(instructions) = extend.instructions {
            field.directives.derives.instructions = Some(InstructionsData { instructions });
        }
    }

    for value_override in extension.enum_overrides {
        let Some(value) = primary
            .values
            .iter_mut()
            .find(|v| v.name == value_override.name)
        else {
            diagnostics
                .report(
                    DiagnosticKind::UnknownEnumOverride,
                    value_override.location.clone(),
                )
                .message(value_override.name.as_str())
                .emit();
            continue;
        };
        value.directives.figment.enum_value = Some(value_override.value);
    }
}

/// An extension field either renames a primary field it aliases, or is
/// appended after all existing fields.
fn merge_field(primary: &mut TypeNode, field: FieldNode, diagnostics: &mut Diagnostics) {
    let aliased = primary
        .fields
        .iter_mut()
        .find(|existing| field.directives.figment.has_alias(&existing.name));

    if let Some(existing) = aliased {
        existing.name = field.name;
        existing.directives.union(field.directives);
        if field.description.is_some() {
            existing.description = field.description;
        }
        return;
    }

    if let Some(existing) = primary.fields.iter().find(|f| f.name == field.name) {
        diagnostics
            .report(DiagnosticKind::DuplicateField, field.location.clone())
            .message(field.name.as_str())
            .related_to("first defined here", existing.location.clone())
            .emit();
        return;
    }

    primary.fields.push(field);
}
