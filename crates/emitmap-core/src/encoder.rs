//! Delta encoding of line groups into a mappings string

use std::collections::BTreeMap;

use crate::error::{IndexTable, Result, SourceMapError};
use crate::types::Segment;
use crate::vlq;

/// Previous values each segment field is encoded relative to
///
/// `generated_column` is reset at the start of every generated line; the
/// other four run across the whole map and are never reset.
#[derive(Debug, Default, Clone, Copy)]
struct DeltaCursor {
    generated_column: i64,
    source_index: i64,
    source_line: i64,
    source_column: i64,
    name_index: i64,
}

impl DeltaCursor {
    fn start_line(&mut self) {
        self.generated_column = 0;
    }

    fn encode_segment(&mut self, segment: &Segment, out: &mut String) {
        let generated_column = i64::from(segment.generated_column);
        let source_index = i64::from(segment.source_index);
        let source_line = i64::from(segment.source_line);
        let source_column = i64::from(segment.source_column);

        vlq::encode(generated_column - self.generated_column, out);
        vlq::encode(source_index - self.source_index, out);
        vlq::encode(source_line - self.source_line, out);
        vlq::encode(source_column - self.source_column, out);

        self.generated_column = generated_column;
        self.source_index = source_index;
        self.source_line = source_line;
        self.source_column = source_column;

        if let Some(name_index) = segment.name_index {
            let name_index = i64::from(name_index);
            vlq::encode(name_index - self.name_index, out);
            self.name_index = name_index;
        }
    }
}

/// Encode line groups, keyed by generated line, into a mappings string
///
/// Groups are written in ascending line order. Every generated line below
/// the highest one recorded gets a `;` separator even when it has no
/// segments. Every index is checked against the interned table sizes first,
/// and nothing is returned if one is out of range.
pub fn encode_mappings(
    lines: &BTreeMap<u32, Vec<Segment>>,
    sources_len: usize,
    names_len: usize,
) -> Result<String> {
    for segment in lines.values().flatten() {
        check_index(IndexTable::Sources, segment.source_index, sources_len)?;
        if let Some(name_index) = segment.name_index {
            check_index(IndexTable::Names, name_index, names_len)?;
        }
    }

    let mut out = String::new();
    let mut cursor = DeltaCursor::default();
    let mut previous_line = 0u32;

    for (&line, segments) in lines {
        for _ in previous_line..line {
            out.push(';');
        }
        previous_line = line;

        cursor.start_line();
        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            cursor.encode_segment(segment, &mut out);
        }
    }

    Ok(out)
}

fn check_index(table: IndexTable, index: u32, len: usize) -> Result<()> {
    if (index as usize) < len {
        return Ok(());
    }
    tracing::error!(%table, index, len, "segment references an index that was never interned");
    Err(SourceMapError::DanglingIndex { table, index, len })
}
