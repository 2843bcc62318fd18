//! Document storage for a compilation session.
//!
//! Every document is registered once with its path and kind. Offsets into a
//! document convert to IR [`Source`] locations through the per-document
//! [`LineIndex`].

pub mod line_index;
pub mod reader;

#[cfg(test)]
mod reader_tests;

use figment_core::Source;
use rowan::TextRange;

use line_index::LineIndex;

/// Lightweight handle to a document in a compilation session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct SourceId(pub(crate) u32);

/// What a document contains.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DocumentKind {
    /// Type system definitions and extensions.
    Schema,
    /// Queries, mutations and fragments.
    Operation,
}

/// A byte range inside one document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
    pub source: SourceId,
    pub range: TextRange,
}

impl Span {
    pub fn new(source: SourceId, range: TextRange) -> Self {
        Self { source, range }
    }
}

/// A span together with its IR location (path + lines).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Location {
    pub span: Span,
    pub source: Source,
}

/// A borrowed view of a document.
#[derive(Clone, Copy, Debug)]
pub struct Document<'s> {
    pub id: SourceId,
    pub path: &'s str,
    pub kind: DocumentKind,
    pub content: &'s str,
}

#[derive(Clone, Debug)]
struct DocumentEntry {
    path: String,
    kind: DocumentKind,
    content: String,
    lines: LineIndex,
}

/// Registry of all documents in a parse batch.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<DocumentEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str, kind: DocumentKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(DocumentEntry {
            path: path.to_owned(),
            kind,
            content: content.to_owned(),
            lines: LineIndex::new(content),
        });
        id
    }

    pub fn add_schema(&mut self, path: &str, content: &str) -> SourceId {
        self.add(path, DocumentKind::Schema, content)
    }

    pub fn add_operation(&mut self, path: &str, content: &str) -> SourceId {
        self.add(path, DocumentKind::Operation, content)
    }

    pub fn content(&self, id: SourceId) -> &str {
        &self.entry(id).content
    }

    pub fn path(&self, id: SourceId) -> &str {
        &self.entry(id).path
    }

    pub fn kind(&self, id: SourceId) -> DocumentKind {
        self.entry(id).kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Document<'_> {
        let entry = self.entry(id);
        Document {
            id,
            path: &entry.path,
            kind: entry.kind,
            content: &entry.content,
        }
    }

    /// Iterate over all documents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Document<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| Document {
                id: SourceId(idx as u32),
                path: &entry.path,
                kind: entry.kind,
                content: &entry.content,
            })
    }

    /// Resolve a range to its IR location.
    pub fn locate(&self, id: SourceId, range: TextRange) -> Location {
        let entry = self.entry(id);
        Location {
            span: Span::new(id, range),
            source: Source::new(entry.path.clone(), entry.lines.lines(range)),
        }
    }

    fn entry(&self, id: SourceId) -> &DocumentEntry {
        self.entries
            .get(id.0 as usize)
            .expect("SourceId from another SourceMap")
    }
}
