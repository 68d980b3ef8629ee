//! Line-start tables for offset to line/column lookups

/// Line break table for one source file
///
/// Built once per file by scanning its content. Lookups binary-search the
/// table, so resolving an offset is O(log n) in the number of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIndex {
    /// Byte offsets of each newline character in the file
    line_breaks: Vec<usize>,

    /// Total length of the file in bytes
    total_length: usize,
}

impl LineIndex {
    /// Create a line index by analyzing content
    ///
    /// # Example
    ///
    /// ```
    /// use emitmap_core::LineIndex;
    ///
    /// let index = LineIndex::new("line 1\nline 2\nline 3");
    /// assert_eq!(index.line_count(), 3);
    /// ```
    pub fn new(content: &str) -> Self {
        let line_breaks: Vec<usize> = content
            .bytes()
            .enumerate()
            .filter_map(|(idx, b)| if b == b'\n' { Some(idx) } else { None })
            .collect();

        LineIndex {
            line_breaks,
            total_length: content.len(),
        }
    }

    /// Zero-based line containing `offset`
    ///
    /// A newline belongs to the line it terminates. Returns None past the end.
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        if offset > self.total_length {
            return None;
        }
        let line = match self.line_breaks.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx,
        };
        Some(line)
    }

    /// Byte offset where `line` starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ => self.line_breaks.get(line - 1).map(|brk| brk + 1),
        }
    }

    /// Convert a byte offset into a (line, column) pair
    ///
    /// The column counts UTF-16 code units from the start of the line, so
    /// `content` must be the text this index was built from. Returns None if
    /// the offset is out of bounds or not on a char boundary.
    ///
    /// # Example
    ///
    /// ```
    /// use emitmap_core::LineIndex;
    ///
    /// let content = "hello\nworld";
    /// let index = LineIndex::new(content);
    /// assert_eq!(index.line_column(6, content), Some((1, 0)));
    /// ```
    pub fn line_column(&self, offset: usize, content: &str) -> Option<(u32, u32)> {
        let line = self.line_of(offset)?;
        let start = self.line_start(line)?;
        let prefix = content.get(start..offset)?;
        let column = prefix.encode_utf16().count();

        Some((u32::try_from(line).ok()?, u32::try_from(column).ok()?))
    }

    /// Get the total length of the file in bytes
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Get the number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }
}
