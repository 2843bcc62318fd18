//! Field types, from the grammar and from `@base_action_field` type strings.

use apollo_parser::cst;
use figment_core::{FieldTypeData, Required};

use crate::syntax::name_of;

/// Convert a grammar type. `None` only for syntax the parser already rejected.
pub fn from_cst(ty: &cst::Type) -> Option<FieldTypeData> {
    match ty {
        cst::Type::NamedType(named) => Some(FieldTypeData::reference(
            name_of(named.name())?,
            Required::Optional,
        )),
        cst::Type::ListType(list) => Some(FieldTypeData::list(
            from_cst(&list.ty()?)?,
            Required::Optional,
        )),
        cst::Type::NonNullType(non_null) => {
            if let Some(named) = non_null.named_type() {
                Some(FieldTypeData::reference(
                    name_of(named.name())?,
                    Required::Required,
                ))
            } else {
                let list = non_null.list_type()?;
                Some(FieldTypeData::list(
                    from_cst(&list.ty()?)?,
                    Required::Required,
                ))
            }
        }
    }
}

/// Parse a type string: GraphQL type syntax plus `{T}` for string-keyed maps.
pub fn parse_type_string(input: &str) -> Result<FieldTypeData, String> {
    let mut parser = TypeStringParser {
        chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let ty = parser.parse_type()?;
    if parser.pos != parser.chars.len() {
        return Err(format!(
            "unexpected `{}` after `{}`",
            parser.rest(),
            ty
        ));
    }
    Ok(ty)
}

struct TypeStringParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeStringParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn rest(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<FieldTypeData, String> {
        let ty = match self.peek() {
            Some('[') => {
                self.pos += 1;
                let item = self.parse_type()?;
                self.expect(']')?;
                FieldTypeData::list(item, Required::Optional)
            }
            Some('{') => {
                self.pos += 1;
                let value = self.parse_type()?;
                self.expect('}')?;
                FieldTypeData::map(value, Required::Optional)
            }
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                FieldTypeData::reference(self.parse_name(), Required::Optional)
            }
            Some(c) => return Err(format!("expected a type name, found `{c}`")),
            None => return Err("expected a type name".to_string()),
        };

        if self.eat('!') {
            Ok(with_required(ty))
        } else {
            Ok(ty)
        }
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c == '_' || c.is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(format!("expected `{c}`"))
        }
    }
}

fn with_required(ty: FieldTypeData) -> FieldTypeData {
    match ty {
        FieldTypeData::Reference { definition, .. } => {
            FieldTypeData::reference(definition, Required::Required)
        }
        FieldTypeData::List { item, .. } => FieldTypeData::list(*item, Required::Required),
        FieldTypeData::Map { value, .. } => FieldTypeData::map(*value, Required::Required),
    }
}
