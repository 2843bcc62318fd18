//! Stable textual dump of figments, for tests and build-tool debugging.

use std::fmt::Write;

use figment_core::{
    ActionData, DefinitionData, EnumData, FieldData, RemoteData, Source, SyncableProperties,
    ThingData, VarietyData,
};

pub struct DumpPrinter<'d> {
    definitions: &'d [DefinitionData],
    builtins: bool,
    sources: bool,
}

impl<'d> DumpPrinter<'d> {
    pub fn new(definitions: &'d [DefinitionData]) -> Self {
        Self {
            definitions,
            builtins: true,
            sources: false,
        }
    }

    /// Include synthesized definitions.
    pub fn with_builtins(mut self, value: bool) -> Self {
        self.builtins = value;
        self
    }

    /// Append the source location to every definition and field.
    pub fn with_sources(mut self, value: bool) -> Self {
        self.sources = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for definition in self.definitions {
            if !self.builtins && definition.source().is_builtin() {
                continue;
            }
            self.format_definition(definition, w)?;
        }
        Ok(())
    }

    fn format_definition(&self, definition: &DefinitionData, w: &mut impl Write) -> std::fmt::Result {
        match definition {
            DefinitionData::Thing(thing) => self.format_thing(thing, w),
            DefinitionData::Action(action) => self.format_action(action, w),
            DefinitionData::Enum(data) => self.format_enum(data, w),
            DefinitionData::Variety(variety) => self.format_variety(variety, w),
            DefinitionData::Value(value) => {
                write!(w, "value {}", value.name)?;
                if value.builtin {
                    write!(w, " builtin")?;
                }
                self.end_line(&value.source, w)?;
                self.format_description(value.description.as_deref(), w)
            }
            DefinitionData::Remote(remote) => self.format_remote(remote, w),
            DefinitionData::Auth(auth) => {
                write!(w, "auth {}", auth.name)?;
                self.end_line(&auth.source, w)
            }
        }
    }

    fn format_thing(&self, thing: &ThingData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "thing {}", thing.name)?;
        if thing.is_interface {
            write!(w, " interface")?;
        }
        if thing.is_input {
            write!(w, " input")?;
        }
        if let Some(unique) = thing.unique {
            write!(w, " unique")?;
            if unique.implicit {
                write!(w, "(implicit)")?;
            }
        }
        self.end_line(&thing.properties.source, w)?;
        self.format_description(thing.description.as_deref(), w)?;
        self.format_properties(&thing.properties, w)?;
        if let Some(query) = &thing.query {
            format_text("query", query, w)?;
        }
        Ok(())
    }

    fn format_action(&self, action: &ActionData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "action {}", action.name)?;
        if action.is_base {
            write!(w, " base")?;
        }
        self.end_line(&action.properties.source, w)?;
        self.format_description(action.description.as_deref(), w)?;
        if let Some(priority) = &action.priority {
            writeln!(w, "  priority {}", priority.priority)?;
        }
        if let Some(effect) = &action.effect {
            writeln!(w, "  effect {}", effect)?;
        }
        if let Some(resolves) = &action.resolves {
            writeln!(w, "  resolves {}: {}", resolves.field, resolves.field_type)?;
        }
        self.format_properties(&action.properties, w)?;
        if let Some(operation) = &action.operation {
            format_text("operation", operation, w)?;
        }
        Ok(())
    }

    fn format_enum(&self, data: &EnumData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "enum {}", data.name)?;
        self.end_line(&data.source, w)?;
        self.format_description(data.description.as_deref(), w)?;
        if let Some(remote) = &data.remote {
            writeln!(w, "  remote {}", remote.remote)?;
        }
        for value in &data.values {
            write!(w, "  value {}", value.name)?;
            if let Some(explicit) = &value.value {
                write!(w, " = {:?}", explicit)?;
            }
            if value.deprecated {
                write!(w, " deprecated")?;
                if let Some(reason) = &value.deprecation_reason {
                    write!(w, "({:?})", reason)?;
                }
            }
            self.end_line(&value.source, w)?;
        }
        Ok(())
    }

    fn format_variety(&self, variety: &VarietyData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "variety {}", variety.name)?;
        self.end_line(&variety.source, w)?;
        self.format_description(variety.description.as_deref(), w)?;
        if let Some(remote) = &variety.remote {
            writeln!(w, "  remote {}", remote.remote)?;
        }
        for variant in &variety.variants {
            write!(w, "  variant {}: {}", variant.name, variant.variant_type)?;
            self.end_line(&variant.source, w)?;
        }
        Ok(())
    }

    fn format_remote(&self, remote: &RemoteData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "remote {}", remote.name)?;
        if remote.builtin {
            write!(w, " builtin")?;
        }
        self.end_line(&remote.source, w)?;
        if let Some(endpoint) = &remote.endpoint {
            writeln!(w, "  endpoint {}", endpoint.address)?;
        }
        if let Some(base_action) = &remote.base_action {
            writeln!(w, "  base_action {}", base_action)?;
        }
        Ok(())
    }

    fn format_properties(&self, properties: &SyncableProperties, w: &mut impl Write) -> std::fmt::Result {
        if let Some(remote) = &properties.remote {
            writeln!(w, "  remote {}", remote.remote)?;
        }
        if let Some(auth) = &properties.auth {
            writeln!(w, "  auth {}", auth.auth)?;
        }
        if let Some(endpoint) = &properties.endpoint {
            writeln!(w, "  endpoint {}", endpoint.address)?;
        }
        if !properties.interfaces.is_empty() {
            writeln!(w, "  implements {}", properties.interfaces.join(", "))?;
        }
        for field in &properties.fields {
            self.format_field(field, w)?;
        }
        Ok(())
    }

    fn format_field(&self, field: &FieldData, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "  field {}: {}", field.name, field.field_type)?;
        if field.identifying {
            write!(w, " identifying")?;
        }
        if field.hash_target {
            write!(w, " hash_target")?;
        }
        if field.local_only {
            write!(w, " local")?;
        }
        if field.root {
            write!(w, " root")?;
        }
        if field.deprecated {
            write!(w, " deprecated")?;
            if let Some(reason) = &field.deprecation_reason {
                write!(w, "({:?})", reason)?;
            }
        }
        for (remote, alias) in &field.aliases {
            write!(w, " alias({}: {})", remote, alias)?;
        }

        let derives = &field.derives;
        if let Some(first) = &derives.first_available {
            write!(w, " first_available({})", first.fields.join(", "))?;
        }
        if let Some(remap) = &derives.remap {
            write!(w, " remap({})", remap.path)?;
        }
        if let Some(reactives) = &derives.reactives {
            write!(w, " reactive({})", reactives.fields.join(", "))?;
        }
        if let Some(instructions) = &derives.instructions {
            write!(w, " instructions({:?})", instructions.instructions)?;
        }
        self.end_line(&field.source, w)
    }

    fn format_description(&self, description: Option<&str>, w: &mut impl Write) -> std::fmt::Result {
        match description {
            Some(text) => writeln!(w, "  description {:?}", text),
            None => Ok(()),
        }
    }

    fn end_line(&self, source: &Source, w: &mut impl Write) -> std::fmt::Result {
        if self.sources {
            write!(w, " @ {}", source)?;
        }
        writeln!(w)
    }
}

fn format_text(label: &str, text: &str, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "  {}", label)?;
    for line in text.lines() {
        if line.is_empty() {
            writeln!(w)?;
        } else {
            writeln!(w, "    | {}", line)?;
        }
    }
    Ok(())
}
