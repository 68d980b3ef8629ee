//! Core position types for source map construction

use serde::{Deserialize, Serialize};

/// A unique identifier for a source file registered in a [`SourceContext`](crate::SourceContext)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// A resolved position in an original source file (0-indexed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Path of the source file, as it should appear in `sources`
    pub file: String,
    /// Line number (0-indexed)
    pub line: u32,
    /// Column number (0-indexed, UTF-16 code units)
    pub column: u32,
}

impl SourcePosition {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        SourcePosition {
            file: file.into(),
            line,
            column,
        }
    }
}

/// A position in the generated output (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeneratedPosition {
    pub line: u32,
    pub column: u32,
}

impl GeneratedPosition {
    pub fn new(line: u32, column: u32) -> Self {
        GeneratedPosition { line, column }
    }
}

/// One recorded mapping within a generated line group
///
/// Indices refer to the session's source and name interners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub generated_column: u32,
    pub source_index: u32,
    pub source_line: u32,
    pub source_column: u32,
    pub name_index: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_equality() {
        assert_eq!(FileId(0), FileId(0));
        assert_ne!(FileId(0), FileId(1));
    }

    #[test]
    fn test_generated_position_ordering() {
        let a = GeneratedPosition::new(0, 5);
        let b = GeneratedPosition::new(0, 7);
        let c = GeneratedPosition::new(1, 0);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_serialization_source_position() {
        let pos = SourcePosition::new("src/main.kt", 4, 12);
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"file":"src/main.kt","line":4,"column":12}"#);

        let deserialized: SourcePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, deserialized);
    }
}
