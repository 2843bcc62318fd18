use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::DocumentKind;
use super::reader::{FileEnumerator, SourceReader};
use crate::{Config, Error};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn listing(root: &Path, config: &Config) -> Vec<String> {
    let sources = SourceReader::new(config).read(root).unwrap();
    sources
        .iter()
        .map(|doc| {
            let kind = match doc.kind {
                DocumentKind::Schema => "schema",
                DocumentKind::Operation => "operation",
            };
            format!("{kind} {}", doc.path)
        })
        .collect()
}

#[test]
fn reads_recursively_schemas_first() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "z.graphqls", "scalar Z");
    write(dir.path(), "queries/widget.graphql", "query A { a }");
    write(dir.path(), "nested/b.graphqls", "scalar B");
    write(dir.path(), "a.graphqls", "scalar A");
    write(dir.path(), "README.md", "not a document");

    let docs = listing(dir.path(), &Config::new());

    assert_eq!(
        docs,
        [
            "schema a.graphqls",
            "schema nested/b.graphqls",
            "schema z.graphqls",
            "operation queries/widget.graphql",
        ]
    );
}

#[test]
fn honors_configured_extensions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "schema.gqls", "scalar A");
    write(dir.path(), "schema.graphqls", "scalar B");
    write(dir.path(), "op.gql", "query A { a }");

    let config = Config::new()
        .schema_extensions(["gqls"])
        .operation_extensions(["gql"]);
    let docs = listing(dir.path(), &config);

    assert_eq!(docs, ["schema schema.gqls", "operation op.gql"]);
}

#[test]
fn keeps_document_content() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "schema.graphqls", "type Widget {\n  id: ID!\n}\n");

    let sources = SourceReader::new(&Config::new()).read(dir.path()).unwrap();
    let doc = sources.iter().next().unwrap();

    assert_eq!(doc.content, "type Widget {\n  id: ID!\n}\n");
}

#[test]
fn missing_root_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = SourceReader::new(&Config::new())
        .read(&missing)
        .unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

struct MemoryEnumerator {
    files: BTreeMap<PathBuf, String>,
}

impl FileEnumerator for MemoryEnumerator {
    fn enumerate(&self, root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(root))
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| extensions.iter().any(|x| x == e))
            })
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }
}

#[test]
fn custom_enumerator() {
    let files = BTreeMap::from([
        (
            PathBuf::from("/virtual/ops/get.graphql"),
            "query Get { a }".to_string(),
        ),
        (
            PathBuf::from("/virtual/schema.graphqls"),
            "type Query { a: Int }".to_string(),
        ),
    ]);

    let sources = SourceReader::new(&Config::new())
        .with_enumerator(MemoryEnumerator { files })
        .read(Path::new("/virtual"))
        .unwrap();

    let paths: Vec<&str> = sources.iter().map(|doc| doc.path).collect();
    assert_eq!(paths, ["schema.graphqls", "ops/get.graphql"]);
}
