//! Recursive document discovery.
//!
//! The [`FileEnumerator`] seam lets build tooling supply documents from
//! somewhere other than the local file system.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{DocumentKind, SourceMap};
use crate::{Config, Error, Result};

/// Lists and reads documents below a root.
pub trait FileEnumerator {
    /// All files under `root` whose extension is in `extensions`, in a stable order.
    fn enumerate(&self, root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>>;

    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Walks the local file system, sorted by file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEnumerator;

impl FileEnumerator for FsEnumerator {
    fn enumerate(&self, root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if has_extension(entry.path(), extensions) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Reads schema and operation documents into a [`SourceMap`].
///
/// Schema documents are registered before operation documents. Paths are
/// recorded relative to the root.
#[derive(Debug, Clone)]
pub struct SourceReader<E = FsEnumerator> {
    enumerator: E,
    schema_extensions: Vec<String>,
    operation_extensions: Vec<String>,
}

impl SourceReader<FsEnumerator> {
    pub fn new(config: &Config) -> Self {
        Self {
            enumerator: FsEnumerator,
            schema_extensions: config.schema_extension_list().to_vec(),
            operation_extensions: config.operation_extension_list().to_vec(),
        }
    }
}

impl<E: FileEnumerator> SourceReader<E> {
    /// Replace the file enumerator.
    pub fn with_enumerator<F: FileEnumerator>(self, enumerator: F) -> SourceReader<F> {
        SourceReader {
            enumerator,
            schema_extensions: self.schema_extensions,
            operation_extensions: self.operation_extensions,
        }
    }

    pub fn read(&self, root: &Path) -> Result<SourceMap> {
        let mut sources = SourceMap::new();
        self.read_kind(root, DocumentKind::Schema, &mut sources)?;
        self.read_kind(root, DocumentKind::Operation, &mut sources)?;

        tracing::debug!(
            root = %root.display(),
            documents = sources.len(),
            "read documents"
        );
        Ok(sources)
    }

    fn read_kind(&self, root: &Path, kind: DocumentKind, sources: &mut SourceMap) -> Result<()> {
        let extensions = match kind {
            DocumentKind::Schema => &self.schema_extensions,
            DocumentKind::Operation => &self.operation_extensions,
        };

        let paths = self
            .enumerator
            .enumerate(root, extensions)
            .map_err(|source| Error::Io {
                path: root.to_path_buf(),
                source,
            })?;

        for path in paths {
            let content = self.enumerator.read(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let relative = path.strip_prefix(root).unwrap_or(&path);
            sources.add(&relative.to_string_lossy(), kind, &content);
        }
        Ok(())
    }
}
