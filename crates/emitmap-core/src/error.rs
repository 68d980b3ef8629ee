//! Error types for source map construction

use std::fmt;
use thiserror::Error;

/// Which interned table an encoded index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTable {
    Sources,
    Names,
}

impl fmt::Display for IndexTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTable::Sources => write!(f, "sources"),
            IndexTable::Names => write!(f, "names"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SourceMapError {
    #[error("source map session is already open")]
    AlreadyOpen,

    #[error("source map session is closed")]
    SessionClosed,

    #[error("source map session has not been opened")]
    NotOpen,

    #[error("segment references {table} index {index}, but only {len} entries are interned")]
    DanglingIndex {
        table: IndexTable,
        index: u32,
        len: usize,
    },

    #[error("{table} table is full: no index past u32::MAX can be encoded")]
    IndexOverflow { table: IndexTable },

    #[error("invalid mappings at byte {position}: {message}")]
    Decode { position: usize, message: String },

    #[error("unsupported source map version {0}, expected 3")]
    UnsupportedVersion(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceMapError {
    pub(crate) fn decode(position: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            position,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceMapError>;
