//! Grammar parsing via `apollo-parser`, plus small CST helpers.
//!
//! The parser is lossless: every node keeps its exact text and byte range,
//! which wire-text assembly and source locations rely on.

pub mod value;

#[cfg(test)]
mod value_tests;

use apollo_parser::cst::{self, CstNode};
use apollo_parser::{Parser, SyntaxNode};
use figment_core::Source;
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::{DocumentKind, Location, SourceId, SourceMap};
use crate::{Error, Result};

pub use value::ConstValue;

/// A document that parsed without syntax errors.
#[derive(Clone, Debug)]
pub struct ParsedDocument {
    pub id: SourceId,
    pub kind: DocumentKind,
    pub document: cst::Document,
}

/// Parse every document, aborting on the first one with syntax errors.
pub fn parse_sources(sources: &SourceMap) -> Result<Vec<ParsedDocument>> {
    let mut parsed = Vec::with_capacity(sources.len());

    for doc in sources.iter() {
        let tree = Parser::new(doc.content).parse();

        let mut diagnostics = Diagnostics::new();
        for error in tree.errors() {
            let start = error.index().min(doc.content.len());
            let end = (start + error.data().len()).min(doc.content.len());
            let range = TextRange::new(text_size(start), text_size(end));
            diagnostics
                .report(DiagnosticKind::SyntaxError, sources.locate(doc.id, range))
                .message(error.message())
                .emit();
        }
        if !diagnostics.is_empty() {
            return Err(Error::SyntaxError {
                path: doc.path.to_string(),
                diagnostics,
            });
        }

        parsed.push(ParsedDocument {
            id: doc.id,
            kind: doc.kind,
            document: tree.document(),
        });
    }

    tracing::debug!(documents = parsed.len(), "parsed documents");
    Ok(parsed)
}

/// Resolves CST nodes of one document to locations.
#[derive(Clone, Copy)]
pub struct DocumentContext<'s> {
    pub sources: &'s SourceMap,
    pub id: SourceId,
}

impl<'s> DocumentContext<'s> {
    pub fn new(sources: &'s SourceMap, id: SourceId) -> Self {
        Self { sources, id }
    }

    pub fn locate(&self, node: &SyntaxNode) -> Location {
        self.sources.locate(self.id, trimmed_range(node))
    }

    pub fn source(&self, node: &SyntaxNode) -> Source {
        self.locate(node).source
    }

    pub fn path(&self) -> &'s str {
        self.sources.path(self.id)
    }
}

/// Commas are insignificant in GraphQL, like whitespace.
fn is_ignored(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn text_size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

/// Byte range of a node without surrounding whitespace and commas.
pub fn trimmed_range(node: &SyntaxNode) -> TextRange {
    let text = node.text().to_string();
    let start = u32::from(node.text_range().start()) as usize;
    let leading = text.len() - text.trim_start_matches(is_ignored).len();
    let len = text.trim_matches(is_ignored).len();
    TextRange::at(text_size(start + leading), text_size(len))
}

/// Exact source text of a node without surrounding whitespace.
pub fn node_text(node: &SyntaxNode) -> String {
    node.text().to_string().trim_matches(is_ignored).to_string()
}

pub fn name_of(name: Option<cst::Name>) -> Option<String> {
    name.map(|n| n.text().to_string())
}

pub fn description_of(description: Option<cst::Description>) -> Option<String> {
    description
        .and_then(|d| d.string_value())
        .map(|s| value::unquote(&node_text(s.syntax())))
}

/// Human-readable kind of a top-level definition, for messages.
pub fn definition_label(definition: &cst::Definition) -> &'static str {
    match definition {
        cst::Definition::OperationDefinition(_) => "operation",
        cst::Definition::FragmentDefinition(_) => "fragment",
        cst::Definition::DirectiveDefinition(_) => "directive definition",
        cst::Definition::SchemaDefinition(_) => "schema definition",
        cst::Definition::ScalarTypeDefinition(_) => "scalar",
        cst::Definition::ObjectTypeDefinition(_) => "object type",
        cst::Definition::InterfaceTypeDefinition(_) => "interface",
        cst::Definition::UnionTypeDefinition(_) => "union",
        cst::Definition::EnumTypeDefinition(_) => "enum",
        cst::Definition::InputObjectTypeDefinition(_) => "input type",
        cst::Definition::SchemaExtension(_) => "schema extension",
        cst::Definition::ScalarTypeExtension(_) => "scalar extension",
        cst::Definition::ObjectTypeExtension(_) => "object type extension",
        cst::Definition::InterfaceTypeExtension(_) => "interface extension",
        cst::Definition::UnionTypeExtension(_) => "union extension",
        cst::Definition::EnumTypeExtension(_) => "enum extension",
        cst::Definition::InputObjectTypeExtension(_) => "input type extension",
    }
}
