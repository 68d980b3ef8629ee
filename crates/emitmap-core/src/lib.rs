//! Source map generation for code emitters
//!
//! This crate records, while a generator writes output, which generated
//! positions came from which source positions, and turns that record into a
//! version 3 source map.
//!
//! # Overview
//!
//! The core types are:
//! - [`SourceMapBuilder`]: accumulates mappings for one output file
//! - [`EmissionConsumer`]: resolves generator tokens and feeds the builder
//! - [`SourceResolver`]: turns an opaque token into a [`SourcePosition`]
//! - [`SourceContext`] / [`SourceInfo`]: the stock resolver and token type
//! - [`MapArtifact`]: the finished map, serializable to JSON
//!
//! # Example
//!
//! ```rust
//! use emitmap_core::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("main.kt".into(), Some("fun main() {}".into()));
//!
//! let mut consumer = EmissionConsumer::open(&ctx, SourceMapOptions::new("main.js")).unwrap();
//! consumer
//!     .notify(GeneratedPosition::new(0, 9), &SourceInfo::original(file_id, 4))
//!     .unwrap();
//! consumer
//!     .notify(GeneratedPosition::new(0, 13), &SourceInfo::Synthetic)
//!     .unwrap();
//!
//! let map = consumer.finish().unwrap();
//! assert_eq!(map.sources(), ["main.kt"]);
//! assert_eq!(map.mappings(), "SAAI");
//! ```

pub mod artifact;
pub mod builder;
pub mod consumer;
pub mod context;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod interner;
pub mod line_index;
pub mod options;
pub mod resolve;
pub mod source_info;
pub mod types;
pub mod vlq;

// Re-export main types
pub use artifact::{MapArtifact, ResolvedMapping, SOURCE_MAP_VERSION};
pub use builder::SourceMapBuilder;
pub use consumer::EmissionConsumer;
pub use context::{SourceContext, SourceFile};
pub use decoder::{MappingEntry, decode_mappings};
pub use encoder::encode_mappings;
pub use error::{IndexTable, Result, SourceMapError};
pub use interner::Interner;
pub use line_index::LineIndex;
pub use options::SourceMapOptions;
pub use resolve::SourceResolver;
pub use source_info::SourceInfo;
pub use types::{FileId, GeneratedPosition, Segment, SourcePosition};
