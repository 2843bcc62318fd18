//! Constant values of directive arguments.

use apollo_parser::cst::{self, CstNode};
use indexmap::IndexMap;

use super::{name_of, node_text};

/// A literal argument value, with strings already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    Null,
    Bool(bool),
    /// Kept as written; directive arguments never need arithmetic.
    Int(String),
    Float(String),
    String(String),
    Enum(String),
    List(Vec<ConstValue>),
    Object(IndexMap<String, ConstValue>),
    Variable(String),
}

impl ConstValue {
    pub fn from_cst(value: &cst::Value) -> Self {
        match value {
            cst::Value::Variable(v) => Self::Variable(name_of(v.name()).unwrap_or_default()),
            cst::Value::StringValue(s) => Self::String(unquote(&node_text(s.syntax()))),
            cst::Value::FloatValue(f) => Self::Float(node_text(f.syntax())),
            cst::Value::IntValue(i) => Self::Int(node_text(i.syntax())),
            cst::Value::BooleanValue(b) => Self::Bool(node_text(b.syntax()) == "true"),
            cst::Value::NullValue(_) => Self::Null,
            cst::Value::EnumValue(e) => Self::Enum(node_text(e.syntax())),
            cst::Value::ListValue(list) => {
                Self::List(list.values().map(|v| Self::from_cst(&v)).collect())
            }
            cst::Value::ObjectValue(object) => Self::Object(
                object
                    .object_fields()
                    .filter_map(|field| {
                        let name = name_of(field.name())?;
                        let value = field.value()?;
                        Some((name, Self::from_cst(&value)))
                    })
                    .collect(),
            ),
        }
    }

    /// Text of a string or enum value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// A list of strings. A single string is accepted as a one-element list,
    /// matching GraphQL input coercion.
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Self::String(s) | Self::Enum(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }
}

/// Decode a string literal as written in the document, quotes included.
pub fn unquote(raw: &str) -> String {
    if let Some(body) = raw
        .strip_prefix("\"\"\"")
        .and_then(|rest| rest.strip_suffix("\"\"\""))
    {
        return block_string_value(&body.replace("\\\"\"\"", "\"\"\""));
    }

    let body = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    unescape(body)
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Common indentation removal and blank-line trimming of block strings.
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();

    let indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let trimmed = line.trim_start_matches([' ', '\t']);
            (!trimmed.is_empty()).then(|| line.len() - trimmed.len())
        })
        .min();

    let mut out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match indent {
            Some(n) if i > 0 => line.get(n..).unwrap_or(""),
            _ => line,
        })
        .collect();

    while out.first().is_some_and(|line| is_blank(line)) {
        out.remove(0);
    }
    while out.last().is_some_and(|line| is_blank(line)) {
        out.pop();
    }

    out.join("\n")
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}
