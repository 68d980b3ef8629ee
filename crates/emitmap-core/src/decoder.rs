//! Decoding a mappings string back into absolute positions

use serde::Serialize;

use crate::error::{Result, SourceMapError};
use crate::types::GeneratedPosition;
use crate::vlq;

/// One decoded segment with every field made absolute again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub generated: GeneratedPosition,
    pub source_index: u32,
    pub source_line: u32,
    pub source_column: u32,
    pub name_index: Option<u32>,
}

/// Decode a mappings string into entries, in line order and stored order
/// within each line
///
/// One-field segments (a generated column with no source) are valid in the
/// format but carry nothing to map to; they advance the column cursor and are
/// otherwise dropped.
pub fn decode_mappings(mappings: &str) -> Result<Vec<MappingEntry>> {
    let bytes = mappings.as_bytes();
    let mut entries = Vec::new();

    let mut generated_line: u32 = 0;
    let mut generated_column: u32 = 0;
    let mut source_index: u32 = 0;
    let mut source_line: u32 = 0;
    let mut source_column: u32 = 0;
    let mut name_index: u32 = 0;

    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b';' => {
                generated_line = accumulate(generated_line, 1, pos)?;
                generated_column = 0;
                pos += 1;
                continue;
            }
            b',' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let start = pos;
        let mut fields = [0i64; 5];
        let mut count = 0;
        while pos < bytes.len() && bytes[pos] != b',' && bytes[pos] != b';' {
            if count == fields.len() {
                return Err(SourceMapError::decode(start, "segment has more than 5 fields"));
            }
            let (value, consumed) = vlq::decode(&bytes[pos..], pos)?;
            fields[count] = value;
            count += 1;
            pos += consumed;
        }

        generated_column = accumulate(generated_column, fields[0], start)?;
        match count {
            1 => continue,
            4 | 5 => {}
            _ => {
                return Err(SourceMapError::decode(
                    start,
                    format!("segment has {count} fields, expected 1, 4 or 5"),
                ));
            }
        }

        source_index = accumulate(source_index, fields[1], start)?;
        source_line = accumulate(source_line, fields[2], start)?;
        source_column = accumulate(source_column, fields[3], start)?;
        let name = if count == 5 {
            name_index = accumulate(name_index, fields[4], start)?;
            Some(name_index)
        } else {
            None
        };

        entries.push(MappingEntry {
            generated: GeneratedPosition {
                line: generated_line,
                column: generated_column,
            },
            source_index,
            source_line,
            source_column,
            name_index: name,
        });
    }

    Ok(entries)
}

/// Apply `delta` to a running total, keeping it within 0..=u32::MAX
fn accumulate(total: u32, delta: i64, position: usize) -> Result<u32> {
    i64::from(total)
        .checked_add(delta)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| {
            SourceMapError::decode(
                position,
                format!("field {total} plus delta {delta} overflows the 0..=u32::MAX range"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        line: u32,
        column: u32,
        source_index: u32,
        source_line: u32,
        source_column: u32,
        name_index: Option<u32>,
    ) -> MappingEntry {
        MappingEntry {
            generated: GeneratedPosition::new(line, column),
            source_index,
            source_line,
            source_column,
            name_index,
        }
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_mappings("").unwrap().is_empty());
        assert!(decode_mappings(";;;").unwrap().is_empty());
    }

    #[test]
    fn test_decode_two_lines() {
        let entries = decode_mappings("AAAA,KAAUA;ACGE").unwrap();
        assert_eq!(
            entries,
            vec![
                entry(0, 0, 0, 0, 0, None),
                entry(0, 5, 0, 0, 10, Some(0)),
                entry(1, 0, 1, 3, 12, None),
            ]
        );
    }

    #[test]
    fn test_decode_skips_empty_lines() {
        let entries = decode_mappings(";;AAAA;;;AACA").unwrap();
        assert_eq!(entries[0].generated, GeneratedPosition::new(2, 0));
        assert_eq!(entries[1].generated, GeneratedPosition::new(5, 0));
        assert_eq!(entries[1].source_line, 1);
    }

    #[test]
    fn test_decode_one_field_segment_advances_column() {
        let entries = decode_mappings("E,EAAA").unwrap();
        assert_eq!(entries, vec![entry(0, 4, 0, 0, 0, None)]);
    }

    #[test]
    fn test_decode_rejects_bad_field_count() {
        assert!(matches!(
            decode_mappings("AA"),
            Err(SourceMapError::Decode { position: 0, .. })
        ));
        assert!(decode_mappings("AAAAAA").is_err());
    }

    #[test]
    fn test_decode_rejects_overflow() {
        // Each segment is a single field holding i64::MAX
        assert!(matches!(
            decode_mappings("+///////////P,+///////////P"),
            Err(SourceMapError::Decode { position: 0, .. })
        ));
        // A column one past u32::MAX: "+/////H" is 2^32 - 1, then +1 in the next segment
        assert!(matches!(
            decode_mappings("+/////H,C"),
            Err(SourceMapError::Decode { position: 8, .. })
        ));
        // A total at u32::MAX plus a delta of i64::MAX
        assert!(decode_mappings("+/////HAAA,+///////////PAAA").is_err());
        // Source line running below zero on a later line
        assert!(decode_mappings("AACA;AAFA").is_err());
    }

    #[test]
    fn test_decode_rejects_negative_absolute() {
        // Source line delta of -1 from 0
        assert!(decode_mappings("AADA").is_err());
    }
}
