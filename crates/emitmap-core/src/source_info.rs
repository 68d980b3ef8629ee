//! Source tokens carried by generated output

use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// Where a piece of generated output came from
///
/// This is the token type [`SourceContext`](crate::SourceContext) knows how to
/// resolve. Generators attach one to each emitted unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceInfo {
    /// Byte offset in an original file
    Original { file_id: FileId, offset: usize },
    /// Text extracted or inlined from a parent construct, starting `offset`
    /// bytes into the parent
    Substring {
        parent: Box<SourceInfo>,
        offset: usize,
    },
    /// Compiler-generated output with no source-backed origin
    Synthetic,
}

impl SourceInfo {
    /// Create source info for a position in an original file
    pub fn original(file_id: FileId, offset: usize) -> Self {
        SourceInfo::Original { file_id, offset }
    }

    /// Create source info for text located `offset` bytes into `parent`
    pub fn substring(parent: SourceInfo, offset: usize) -> Self {
        SourceInfo::Substring {
            parent: Box::new(parent),
            offset,
        }
    }

    /// Walk the parent chain down to the original file and absolute offset
    ///
    /// Returns None for synthetic tokens, including a substring of one.
    pub fn original_offset(&self) -> Option<(FileId, usize)> {
        match self {
            SourceInfo::Original { file_id, offset } => Some((*file_id, *offset)),
            SourceInfo::Substring { parent, offset } => {
                let (file_id, parent_offset) = parent.original_offset()?;
                Some((file_id, parent_offset.checked_add(*offset)?))
            }
            SourceInfo::Synthetic => None,
        }
    }
}
