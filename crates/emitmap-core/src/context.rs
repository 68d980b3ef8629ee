//! Source context for managing the files a generator reads from

use crate::line_index::LineIndex;
use crate::types::FileId;
use once_cell::sync::OnceCell;

/// Registry of source files that source tokens point into
///
/// A context is read-only once populated, so several map sessions running in
/// parallel may share one through a plain reference.
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

/// A source file with content and a lazily built line index
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File path, as it should appear in a map's `sources` list
    pub path: String,
    /// File content. None when a disk-backed file could not be read
    pub content: Option<String>,
    line_index: OnceCell<LineIndex>,
}

impl SourceFile {
    /// Line index for this file, built on first use and cached afterwards
    pub fn line_index(&self) -> Option<&LineIndex> {
        let content = self.content.as_deref()?;
        Some(self.line_index.get_or_init(|| LineIndex::new(content)))
    }

    /// Resolve a byte offset to a (line, column) pair in this file
    pub fn line_column(&self, offset: usize) -> Option<(u32, u32)> {
        let content = self.content.as_deref()?;
        self.line_index()?.line_column(offset, content)
    }
}

impl SourceContext {
    /// Create a new empty source context
    pub fn new() -> Self {
        SourceContext { files: Vec::new() }
    }

    /// Add a file to the context and return its ID
    ///
    /// - If content is Some: the file is held in memory.
    /// - If content is None: the content is read from disk at `path`. A file
    ///   that cannot be read is still registered, but offsets into it never
    ///   resolve.
    pub fn add_file(&mut self, path: String, content: Option<String>) -> FileId {
        let id = FileId(self.files.len());
        let content = match content {
            Some(c) => Some(c),
            None => std::fs::read_to_string(&path).ok(),
        };

        self.files.push(SourceFile {
            path,
            content,
            line_index: OnceCell::new(),
        });
        id
    }

    /// Get a file by ID
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Iterate over all registered files in registration order
    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(idx, file)| (FileId(idx), file))
    }

    /// Content of the first file registered under `path`
    pub fn content_for_path(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .and_then(|f| f.content.as_deref())
    }
}
